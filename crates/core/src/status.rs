//! Status enums for every lifecycle document.
//!
//! Statuses are persisted as lowercase snake_case TEXT columns guarded by
//! CHECK constraints in the migrations. Each enum round-trips through
//! [`as_str`](ProjectStatus::as_str) / [`FromStr`](std::str::FromStr) and
//! serializes to the same string with serde.

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the persisted string form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status. Declaration order is lifecycle order.
    ProjectStatus {
        Draft = "draft",
        ProposalSent = "proposal_sent",
        Accepted = "accepted",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Commercial proposal status.
    ProposalStatus {
        Draft = "draft",
        Sent = "sent",
        Accepted = "accepted",
        Rejected = "rejected",
    }
}

define_status_enum! {
    /// Contract status.
    ContractStatus {
        Draft = "draft",
        Sent = "sent",
        Signed = "signed",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Payment status.
    PaymentStatus {
        Pending = "pending",
        Processing = "processing",
        Completed = "completed",
        Failed = "failed",
        Refunded = "refunded",
    }
}

define_status_enum! {
    /// Invoice status.
    InvoiceStatus {
        Draft = "draft",
        Sent = "sent",
        Paid = "paid",
        Overdue = "overdue",
        Cancelled = "cancelled",
    }
}

define_status_enum! {
    /// Task board column.
    TaskStatus {
        Todo = "todo",
        InProgress = "in_progress",
        Review = "review",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Task priority.
    TaskPriority {
        Low = "low",
        Medium = "medium",
        High = "high",
        Urgent = "urgent",
    }
}

impl ProjectStatus {
    /// Position on the forward lifecycle path, or `None` for `Cancelled`,
    /// which sits on a side branch.
    pub fn rank(self) -> Option<u8> {
        match self {
            ProjectStatus::Draft => Some(0),
            ProjectStatus::ProposalSent => Some(1),
            ProjectStatus::Accepted => Some(2),
            ProjectStatus::InProgress => Some(3),
            ProjectStatus::Completed => Some(4),
            ProjectStatus::Cancelled => None,
        }
    }

    /// Terminal statuses accept no further lifecycle events.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}
