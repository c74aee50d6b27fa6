macro_rules! cfg_derive {
	($($item:item)*) => {
		$(
			#[cfg(feature = "derive")]
			$item
		)*
	};
}

macro_rules! cfg_serde {
	($($item:item)*) => {
		$(
			#[cfg(feature = "serde")]
			$item
		)*
	};
}
