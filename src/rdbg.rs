// Roel Kluin, 2023, GPL v3

/// eprintln in debug builds only, prefixed with the call site.
#[macro_export]
macro_rules! dbg_print {
	($($arg:tt)+) => ({
		if cfg!(debug_assertions) {
			eprintln!("[{}:{}] {}", file!(), line!(), format_args!($($arg)+));
		}
	})
}

#[macro_export]
macro_rules! dbg_assert {
	($($arg:tt)+) => ({
		if cfg!(debug_assertions) {
			assert!($($arg)+);
		}
	})
}
