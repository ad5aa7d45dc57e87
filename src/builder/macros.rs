//! Macros for ergonomic state declarations.

/// Declare a plain enum usable as a machine state.
///
/// Derives the traits a state needs plus serde support, and names each
/// variant after its identifier.
///
/// # Example
///
/// ```
/// use wayfarer::core::State;
/// use wayfarer::state_enum;
///
/// state_enum! {
///     pub enum Order {
///         Pending,
///         Processing,
///         Passed,
///     }
/// }
///
/// assert_eq!(Order::Processing.name(), "Processing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }
        }
    };
}
