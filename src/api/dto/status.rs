//! String-backed enums for the backend's status and category fields.
//!
//! Values the client does not know about decode into `Other` and keep
//! their raw text, so a new backend status never breaks a listing.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Value not known to this client, kept verbatim
            Other(String),
        }

        impl $name {
            /// Every value known to this client, in display order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Parses a known wire value; `None` for anything else.
            pub fn parse_known(value: &str) -> Option<Self> {
                match value.trim() {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse_known(&value).unwrap_or($name::Other(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Account role
    pub enum UserRole {
        Client => "client",
        Professional => "professional",
        Admin => "admin",
    }
}

wire_enum! {
    /// Lifecycle of a service request
    pub enum ServiceStatus {
        Pending => "pending",
        Accepted => "accepted",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    /// Kind of carpentry work a service asks for
    pub enum ServiceCategory {
        Moveis => "moveis",
        Reparos => "reparos",
        Instalacao => "instalacao",
        Portas => "portas",
        Janelas => "janelas",
    }
}

wire_enum! {
    pub enum QuoteStatus {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
        Expired => "expired",
    }
}

wire_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}
