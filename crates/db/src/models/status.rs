//! Status helper enums mapping to SMALLSERIAL lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

pub use vexe_core::types::StatusId;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Booking lifecycle status.
    BookingStatus {
        Pending = 1,
        Confirmed = 2,
        Completed = 3,
        Cancelled = 4,
    }
}

define_status_enum! {
    /// Schedule lifecycle status.
    ScheduleStatus {
        Scheduled = 1,
        Departed = 2,
        Completed = 3,
        Cancelled = 4,
    }
}

define_status_enum! {
    /// Payment lifecycle status.
    PaymentStatus {
        Pending = 1,
        Paid = 2,
        Failed = 3,
        Refunded = 4,
    }
}
