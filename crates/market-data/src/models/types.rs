use std::borrow::Cow;

/// Quote currency code, lowercase as the markets endpoint expects - mostly static
pub type Currency = Cow<'static, str>;
