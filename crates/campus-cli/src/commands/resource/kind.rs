//! Resource kinds selectable on the command line.

use clap::ValueEnum;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Rooms,
    Beds,
    Students,
    Guardians,
    Teachers,
    Staff,
    Packages,
    Meals,
}

impl ResourceKind {
    /// Name of one item, for messages.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Rooms => "room",
            ResourceKind::Beds => "bed",
            ResourceKind::Students => "student",
            ResourceKind::Guardians => "guardian",
            ResourceKind::Teachers => "teacher",
            ResourceKind::Staff => "staff member",
            ResourceKind::Packages => "boarding package",
            ResourceKind::Meals => "meal",
        }
    }
}

/// Evaluate `$body` with `$r` bound to the view model type of `$kind`.
macro_rules! dispatch {
    ($kind:expr, $r:ident => $body:expr) => {{
        use campus_core::resources as models;
        use $crate::commands::resource::ResourceKind as Kind;
        match $kind {
            Kind::Rooms => {
                type $r = models::Room;
                $body
            }
            Kind::Beds => {
                type $r = models::Bed;
                $body
            }
            Kind::Students => {
                type $r = models::Student;
                $body
            }
            Kind::Guardians => {
                type $r = models::Guardian;
                $body
            }
            Kind::Teachers => {
                type $r = models::Teacher;
                $body
            }
            Kind::Staff => {
                type $r = models::Staff;
                $body
            }
            Kind::Packages => {
                type $r = models::BoardingPackage;
                $body
            }
            Kind::Meals => {
                type $r = models::Meal;
                $body
            }
        }
    }};
}

pub(crate) use dispatch;
