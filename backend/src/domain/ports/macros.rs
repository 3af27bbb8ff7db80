//! `define_port_error!` builds a `thiserror` enum plus one snake_case
//! constructor per variant, each accepting `impl Into<_>` for its fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Unavailable { message: String } => "store unavailable: {message}",
            Duplicate { email: String, owner: i32 } => "{email} already used by {owner}",
            Closed => "store closed",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = SamplePortError::unavailable("pool timed out");
        assert_eq!(err.to_string(), "store unavailable: pool timed out");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::duplicate("ann@example.com", 3_i32);
        assert_eq!(err.to_string(), "ann@example.com already used by 3");
    }

    #[rstest]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }
}
