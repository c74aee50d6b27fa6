use urlform::{
	EncodeError, Encoder, FieldError, IsZero, Kind, Reflect, TypeInfo, Value,
	Values,
};

#[derive(Debug, Clone, Copy)]
struct Money(i64);

impl Reflect for Money {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Int)
	}

	fn value(&self) -> Value<'_> {
		Value::Int(self.0)
	}
}

#[derive(Debug, Clone, Copy)]
struct Date {
	year: u16,
	month: u8,
	day: u8,
}

impl Reflect for Date {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Opaque)
	}

	fn value(&self) -> Value<'_> {
		Value::Opaque
	}

	fn is_zero_value(&self) -> bool {
		self.year == 0
	}
}

#[derive(Reflect)]
struct Payment {
	amount: Money,
	#[urlform(query = "on,omitempty")]
	date: Date,
	history: Vec<Date>,
}

fn encoder() -> Encoder {
	Encoder::builder()
		.encoder::<Money, _>(|m| format!("{}.{:02}", m.0 / 100, m.0 % 100))
		.encoder::<Date, _>(|d| {
			format!("{:04}-{:02}-{:02}", d.year, d.month, d.day)
		})
		.build()
}

#[test]
fn custom_overrides_builtin() {
	let payment = Payment {
		amount: Money(4200),
		date: Date { year: 2024, month: 2, day: 29 },
		history: vec![Date { year: 2023, month: 12, day: 1 }],
	};

	let err = urlform::to_string(&payment).unwrap_err();
	assert_eq!(err.fields().map(urlform::FieldErrors::len), Some(2));

	let values = encoder().encode_values(&payment).unwrap();
	assert_eq!(
		values.encode(),
		"amount=42.00&on=2024-02-29&history=2023-12-01"
	);
}

#[test]
fn custom_own_emptiness() {
	let payment = Payment {
		amount: Money(1),
		date: Date { year: 0, month: 0, day: 0 },
		history: Vec::new(),
	};

	let values = encoder().encode_values(&payment).unwrap();
	assert_eq!(values.encode(), "amount=0.01");
	assert!(values.get("on").is_none(), "zero date should be omitted");
}

#[test]
fn custom_partial_failure() {
	let payment = Payment {
		amount: Money(150),
		date: Date { year: 2020, month: 1, day: 1 },
		history: Vec::new(),
	};

	let mut values = Values::new();
	let err = Encoder::new().encode(&payment, &mut values).unwrap_err();

	let EncodeError::Fields(errors) = err else {
		panic!("expected field errors");
	};
	assert!(matches!(
		errors.get(core::any::type_name::<Date>()),
		Some(FieldError::NoEncoder { field: "date", .. })
	));
	assert!(errors.contains(core::any::type_name::<Vec<Date>>()));

	assert_eq!(values.encode(), "amount=150");
}

#[derive(Reflect)]
#[urlform(is_zero)]
struct Range {
	from: u32,
	to: u32,
}

impl IsZero for Range {
	fn is_zero(&self) -> bool {
		self.from == self.to
	}
}

#[test]
fn custom_struct_emptiness() {
	#[derive(Reflect)]
	struct Query {
		#[urlform(query = "r,omitempty")]
		range: Range,
	}

	let encoder = Encoder::builder()
		.encoder::<Range, _>(|r| format!("{}..{}", r.from, r.to))
		.build();

	let empty = Query { range: Range { from: 3, to: 3 } };
	assert_eq!(encoder.encode_values(&empty).unwrap().encode(), "");

	let set = Query { range: Range { from: 3, to: 5 } };
	assert_eq!(encoder.encode_values(&set).unwrap().encode(), "r=3..5");
}
