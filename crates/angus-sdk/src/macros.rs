/// Declares a fieldless enum whose variants serialize to fixed string
/// literals, with `as_str`, `FromStr`, `Display` and an `ALL` table.
///
/// ```
/// angus_sdk::literal_enum! {
///     pub enum Color {
///         Red = "RED",
///         DarkBlue = "dark_blue",
///     }
/// }
///
/// assert_eq!(Color::DarkBlue.as_str(), "dark_blue");
/// assert_eq!("RED".parse::<Color>(), Ok(Color::Red));
/// assert_eq!(Color::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $literal:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ();

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    $($literal => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}
