//! Accessor generation macros
//!
//! Eliminates repetitive match code on tuple-variant enums (`Node`, `Value`).
//! Uses `paste` for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with single-field tuple variants
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     impl_enum_accessors!(element => Element(Element), text => Text(Text));
/// }
/// ```
macro_rules! impl_enum_accessors {
    ($($method:ident => $variant:ident($ty:ty)),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " $variant " variant"]
                #[inline]
                pub fn [<is_ $method>](&self) -> bool {
                    matches!(self, Self::$variant(_))
                }

                #[doc = "Try to get as " $method " reference"]
                #[inline]
                pub fn [<as_ $method>](&self) -> Option<&$ty> {
                    match self { Self::$variant(v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $method " reference"]
                #[inline]
                pub fn [<as_ $method _mut>](&mut self) -> Option<&mut $ty> {
                    match self { Self::$variant(v) => Some(v), _ => None }
                }
            )*
        }
    };
}
