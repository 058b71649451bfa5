//! `define_port_error!` declares the error enum shared by every store-backed
//! port.
//!
//! Each enum gets two variants, `Connection` and `Query`, with snake_case
//! constructors taking `impl Into<String>`, and a `From` conversion into the
//! domain [`Error`](crate::domain::Error): connection failures become
//! `service_unavailable`, query failures become `internal_error`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $store:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store could not be reached.
            #[error("{store} connection failed: {message}", store = $store)]
            Connection { message: String },
            /// The store rejected or failed the statement.
            #[error("{store} query failed: {message}", store = $store)]
            Query { message: String },
        }

        impl $name {
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                match error {
                    $name::Connection { message } => {
                        Self::service_unavailable(format!("{} unavailable: {message}", $store))
                    }
                    $name::Query { message } => {
                        Self::internal(format!("{} error: {message}", $store))
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
