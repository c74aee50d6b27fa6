use urlform::{Encoder, Reflect};

#[derive(Reflect)]
struct Tagged {
	#[urlform(query = "Name")]
	name: String,
	#[urlform(query = "Tags")]
	tags: Vec<String>,
	#[urlform(query = "-")]
	skip: String,
}

#[derive(Reflect)]
struct Counter {
	#[urlform(query = "Count,omitempty")]
	count: u64,
}

#[derive(Reflect)]
struct Abc {
	a: u8,
	b: bool,
	c: String,
}

#[test]
fn conformance_name_tags_skip() {
	let value = Tagged {
		name: "a".to_owned(),
		tags: vec!["x".to_owned(), "y".to_owned()],
		skip: "ignored".to_owned(),
	};

	assert_eq!(urlform::to_string(&value).unwrap(), "Name=a&Tags=x&Tags=y");
}

#[test]
fn conformance_omit_empty() {
	assert_eq!(urlform::to_string(&Counter { count: 0 }).unwrap(), "");
	assert_eq!(urlform::to_string(&Counter { count: 9 }).unwrap(), "Count=9");
}

#[test]
fn conformance_declaration_order() {
	let value = Abc { a: 1, b: false, c: "z".to_owned() };
	let values = urlform::to_values(&value).unwrap();

	assert_eq!(values.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
	assert_eq!(values.encode(), "a=1&b=false&c=z");
}

#[test]
fn conformance_scalars() {
	#[derive(Reflect)]
	struct Scalars {
		i: i64,
		u: u16,
		f32: f32,
		f64: f64,
		s: &'static str,
		yes: bool,
	}

	let value = Scalars {
		i: -7,
		u: 65535,
		f32: 0.5,
		f64: 3.25,
		s: "héllo wörld",
		yes: true,
	};

	assert_eq!(
		urlform::to_string(&value).unwrap(),
		"i=-7&u=65535&f32=0.500000&f64=3.250000\
		 &s=h%C3%A9llo+w%C3%B6rld&yes=true"
	);
}

#[test]
fn conformance_pointers() {
	#[derive(Reflect)]
	struct Pointers {
		none: Option<u8>,
		some: Option<u8>,
		direct: u8,
		boxed: Box<u8>,
	}

	let value =
		Pointers { none: None, some: Some(4), direct: 4, boxed: Box::new(4) };
	let values = urlform::to_values(&value).unwrap();

	assert_eq!(values.get_first("none"), Some("null"));
	assert_eq!(values.get("some"), values.get("direct"));
	assert_eq!(values.get("boxed"), values.get("direct"));
}

#[test]
fn conformance_deterministic() {
	let encoder = Encoder::new();

	for _ in 0..32 {
		let value = Abc {
			a: rand::random(),
			b: rand::random(),
			c: (0..8).map(|_| rand::random::<char>()).collect(),
		};

		let first = encoder.encode_values(&value).unwrap();
		let second = encoder.encode_values(&value).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
	}
}
