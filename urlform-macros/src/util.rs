use core::iter::Peekable;

use proc_macro::{
	Delimiter, Group, Ident, Literal, Punct, Spacing, Span, TokenStream,
	TokenTree,
};

/// Try to parse an identifier from `stream`.
///
/// This function will return [`None`] without advancing `stream` if an identifier
/// is not the next token of `stream`. Otherwise it will advance `stream` and
/// return the [`Ident`].
pub fn try_parse_ident<I>(stream: &mut Peekable<I>) -> Option<Ident>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream.next_if(|x| matches!(x, TT::Ident(_)))? {
		TT::Ident(x) => Some(x),
		_ => None,
	}
}

/// Try to parse a punctuation from `stream`.
///
/// This function will return [`None`] without advancing `stream` if a punctuation
/// is not the next token of `stream`. Otherwise it will advance `stream` and
/// return the [`Punct`].
pub fn try_parse_punct<I>(stream: &mut Peekable<I>) -> Option<Punct>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream.next_if(|x| matches!(x, TT::Punct(_)))? {
		TT::Punct(x) => Some(x),
		_ => None,
	}
}

/// Try to parse a literal from `stream`.
///
/// This function will return [`None`] without advancing `stream` if a literal
/// is not the next token of `stream`. Otherwise it will advance `stream` and
/// return the [`Literal`].
pub fn try_parse_literal<I>(stream: &mut Peekable<I>) -> Option<Literal>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream.next_if(|x| matches!(x, TT::Literal(_)))? {
		TT::Literal(x) => Some(x),
		_ => None,
	}
}

/// Try to parse a group delimited by `delimiter` from `stream`.
///
/// This function will return [`None`] without advancing `stream` if such a
/// group is not the next token of `stream`.
pub fn try_parse_group_expected<I>(
	stream: &mut Peekable<I>,
	delimiter: Delimiter,
) -> Option<Group>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream.next_if(
		|x| matches!(x, TT::Group(g) if g.delimiter() == delimiter),
	)? {
		TT::Group(x) => Some(x),
		_ => None,
	}
}

/// Try to parse the punctuation `expected` from `stream`.
///
/// `stream` is only advanced if the next token is `expected`.
pub fn try_parse_punct_expected<I>(
	stream: &mut Peekable<I>,
	expected: char,
) -> Option<Punct>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream
		.next_if(|x| matches!(x, TT::Punct(p) if p.as_char() == expected))?
	{
		TT::Punct(x) => Some(x),
		_ => None,
	}
}

/// Try to parse the identifier `expected` from `stream`.
///
/// `stream` is only advanced if the next token is `expected`.
pub fn try_parse_ident_expected<I>(
	stream: &mut Peekable<I>,
	expected: &str,
) -> Option<Ident>
where
	I: Iterator<Item = TokenTree>,
{
	use TokenTree as TT;
	match stream
		.next_if(|x| matches!(x, TT::Ident(i) if i.to_string() == expected))?
	{
		TT::Ident(x) => Some(x),
		_ => None,
	}
}

/// Get an identifier as written, without the `r#` prefix of raw
/// identifiers.
pub fn unraw(ident: &Ident) -> String {
	let s = ident.to_string();
	match s.strip_prefix("r#") {
		Some(x) => x.to_owned(),
		None => s,
	}
}

/// An error reported to the user with `compile_error!`.
#[derive(Debug)]
pub struct Error {
	message: String,
	span: Span,
}

impl Error {
	pub fn new(message: impl Into<String>, span: Span) -> Self {
		Self { message: message.into(), span }
	}

	/// Expand into `compile_error!("message");` pointing at the offending
	/// tokens.
	pub fn into_compile_error(self) -> TokenStream {
		let span = self.span;

		let mut bang = Punct::new('!', Spacing::Alone);
		bang.set_span(span);

		let mut message = Literal::string(&self.message);
		message.set_span(span);

		let mut args = Group::new(
			Delimiter::Parenthesis,
			TokenStream::from(TokenTree::Literal(message)),
		);
		args.set_span(span);

		let mut semi = Punct::new(';', Spacing::Alone);
		semi.set_span(span);

		[
			TokenTree::Ident(Ident::new("compile_error", span)),
			TokenTree::Punct(bang),
			TokenTree::Group(args),
			TokenTree::Punct(semi),
		]
		.into_iter()
		.collect()
	}
}
