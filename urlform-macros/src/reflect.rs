use core::fmt::Write;
use core::iter::Peekable;

use proc_macro::{
	token_stream, Delimiter, Ident, Literal, Span, TokenStream, TokenTree,
};

use crate::util::{
	try_parse_group_expected, try_parse_ident, try_parse_ident_expected,
	try_parse_literal, try_parse_punct, try_parse_punct_expected, unraw,
	Error,
};

type Stream = Peekable<token_stream::IntoIter>;

const ATTRIBUTE: &str = "urlform";

struct Input {
	name: Ident,
	is_zero: bool,
	fields: Vec<FieldDef>,
}

struct FieldDef {
	ident: Ident,
	tags: Vec<(String, Literal)>,
}

enum Arg {
	Flag(Ident),
	Pair(Ident, Literal),
}

pub fn entry(item: TokenStream) -> TokenStream {
	let input = match parse(item) {
		Ok(x) => x,
		Err(e) => return e.into_compile_error(),
	};

	match expand(&input).parse() {
		Ok(x) => x,
		Err(_) => Error::new(
			"`Reflect` derive produced invalid code",
			input.name.span(),
		)
		.into_compile_error(),
	}
}

fn parse(item: TokenStream) -> Result<Input, Error> {
	let mut stream = item.into_iter().peekable();

	let mut is_zero = false;
	for arg in parse_attributes(&mut stream)? {
		match arg {
			Arg::Flag(x) if x.to_string() == "is_zero" => is_zero = true,
			Arg::Flag(x) | Arg::Pair(x, _) => {
				return Err(Error::new(
					format!("unknown container attribute `{x}`"),
					x.span(),
				));
			},
		}
	}

	skip_visibility(&mut stream);

	if try_parse_ident_expected(&mut stream, "struct").is_none() {
		let span = stream.peek().map_or_else(Span::call_site, TokenTree::span);
		return Err(Error::new(
			"`Reflect` can only be derived for structs",
			span,
		));
	}

	let name = try_parse_ident(&mut stream)
		.ok_or_else(|| Error::new("expected struct name", Span::call_site()))?;

	if let Some(p) = try_parse_punct_expected(&mut stream, '<') {
		return Err(Error::new(
			"`Reflect` cannot be derived for generic structs",
			p.span(),
		));
	}

	let fields = match stream.next() {
		Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {
			parse_fields(g.stream())?
		},
		Some(TokenTree::Punct(p)) if p.as_char() == ';' => Vec::new(),
		Some(TokenTree::Group(g))
			if g.delimiter() == Delimiter::Parenthesis =>
		{
			return Err(Error::new(
				"`Reflect` cannot be derived for tuple structs",
				g.span(),
			));
		},
		Some(other) => {
			return Err(Error::new("expected struct body", other.span()))
		},
		None => {
			return Err(Error::new("expected struct body", name.span()))
		},
	};

	Ok(Input { name, is_zero, fields })
}

fn parse_fields(body: TokenStream) -> Result<Vec<FieldDef>, Error> {
	let mut stream = body.into_iter().peekable();
	let mut fields = Vec::new();

	loop {
		let args = parse_attributes(&mut stream)?;
		if stream.peek().is_none() {
			break;
		}

		skip_visibility(&mut stream);

		let ident = try_parse_ident(&mut stream).ok_or_else(|| {
			let span =
				stream.peek().map_or_else(Span::call_site, TokenTree::span);
			Error::new("expected field name", span)
		})?;

		if try_parse_punct_expected(&mut stream, ':').is_none() {
			return Err(Error::new("expected `:` after field name", ident.span()));
		}
		skip_type(&mut stream);

		let mut tags: Vec<(String, Literal)> = Vec::new();
		for arg in args {
			let (key, value) = match arg {
				Arg::Pair(key, value) => (key, value),
				Arg::Flag(x) => {
					return Err(Error::new(
						format!("expected `{x} = \"...\"`"),
						x.span(),
					));
				},
			};

			let key_str = unraw(&key);
			if tags.iter().any(|(k, _)| *k == key_str) {
				return Err(Error::new(
					format!("duplicate tag `{key_str}`"),
					key.span(),
				));
			}
			tags.push((key_str, value));
		}

		fields.push(FieldDef { ident, tags });
	}

	Ok(fields)
}

/// Parse all outer attributes and return the arguments of the `urlform` ones.
///
/// Other attributes are skipped.
fn parse_attributes(stream: &mut Stream) -> Result<Vec<Arg>, Error> {
	let mut args = Vec::new();

	while let Some(pound) = try_parse_punct_expected(stream, '#') {
		let group = try_parse_group_expected(stream, Delimiter::Bracket)
			.ok_or_else(|| Error::new("expected attribute", pound.span()))?;

		let mut inner = group.stream().into_iter().peekable();
		if try_parse_ident_expected(&mut inner, ATTRIBUTE).is_none() {
			continue;
		}

		let list = try_parse_group_expected(&mut inner, Delimiter::Parenthesis)
			.ok_or_else(|| {
				Error::new(
					"expected `urlform(...)`",
					group.span(),
				)
			})?;

		parse_args(list.stream(), &mut args)?;
	}

	Ok(args)
}

/// Parse `flag, key = "value", ...`.
fn parse_args(list: TokenStream, args: &mut Vec<Arg>) -> Result<(), Error> {
	let mut stream = list.into_iter().peekable();

	while stream.peek().is_some() {
		let key = try_parse_ident(&mut stream).ok_or_else(|| {
			let span =
				stream.peek().map_or_else(Span::call_site, TokenTree::span);
			Error::new("expected identifier", span)
		})?;

		if try_parse_punct_expected(&mut stream, '=').is_some() {
			let value = try_parse_literal(&mut stream)
				.filter(is_str_literal)
				.ok_or_else(|| {
					Error::new("expected string literal", key.span())
				})?;
			args.push(Arg::Pair(key, value));
		} else {
			args.push(Arg::Flag(key));
		}

		match stream.next() {
			None => break,
			Some(TokenTree::Punct(p)) if p.as_char() == ',' => {},
			Some(other) => {
				return Err(Error::new("expected `,`", other.span()))
			},
		}
	}

	Ok(())
}

fn is_str_literal(lit: &Literal) -> bool {
	let s = lit.to_string();
	s.starts_with('"') || s.starts_with("r\"") || s.starts_with("r#")
}

/// Skip `pub`, `pub(crate)`, `pub(in path)` and friends.
fn skip_visibility(stream: &mut Stream) {
	if try_parse_ident_expected(stream, "pub").is_some() {
		let _ = try_parse_group_expected(stream, Delimiter::Parenthesis);
	}
}

/// Skip the tokens of a field type up to and including the `,` that ends
/// it.
fn skip_type(stream: &mut Stream) {
	let mut depth = 0_usize;
	let mut after_dash = false;

	while stream.peek().is_some() {
		let Some(p) = try_parse_punct(stream) else {
			after_dash = false;
			stream.next();
			continue;
		};

		match p.as_char() {
			',' if depth == 0 => return,
			'<' => depth += 1,
			'>' if !after_dash => depth = depth.saturating_sub(1),
			_ => {},
		}

		after_dash = p.as_char() == '-';
	}
}

fn expand(input: &Input) -> String {
	let name = &input.name;

	let mut fields = String::new();
	for field in &input.fields {
		let mut tags = String::new();
		for (key, value) in &field.tags {
			let _ = write!(tags, "(\"{key}\", {value}),");
		}

		let _ = write!(
			fields,
			"::urlform::Field::new(\"{ident}\", &[{tags}], &self.{ident}),",
			ident = field.ident,
		);
	}

	let is_zero = if input.is_zero {
		"fn is_zero_value(&self) -> bool {
			<Self as ::urlform::IsZero>::is_zero(self)
		}"
	} else {
		""
	};

	format!(
		"#[automatically_derived]
		impl ::urlform::Reflect for {name} {{
			fn type_info() -> ::urlform::TypeInfo {{
				::urlform::TypeInfo::of::<Self>(::urlform::Kind::Struct)
			}}

			fn value(&self) -> ::urlform::Value<'_> {{
				::urlform::Value::Struct(::std::vec![{fields}])
			}}

			{is_zero}
		}}"
	)
}
