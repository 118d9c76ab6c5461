use std::fmt;

/// Kinds of audited user activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    ProfileUpdate,
    Login,
    Logout,
    Appointment,
    RecordView,
    RecordUpdate,
    Message,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::ProfileUpdate => "profile_update",
            ActivityType::Login => "login",
            ActivityType::Logout => "logout",
            ActivityType::Appointment => "appointment",
            ActivityType::RecordView => "record_view",
            ActivityType::RecordUpdate => "record_update",
            ActivityType::Message => "message",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
