use crate::forms::Role;
use crate::session::{CurrentUser, SessionProvider};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const ADMIN_PATH: &str = "/admin";

/// Back-office pages gated by role.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdminArea {
    Dashboard,
    Products,
    Orders,
    Users,
}

impl AdminArea {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            AdminArea::Dashboard | AdminArea::Products | AdminArea::Orders => role.is_staff(),
            AdminArea::Users => role == Role::Admin,
        }
    }

    /// Where a signed-in user without access is sent.
    fn fallback_path(&self) -> &'static str {
        match self {
            AdminArea::Dashboard => HOME_PATH,
            AdminArea::Products | AdminArea::Orders | AdminArea::Users => ADMIN_PATH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Granted(CurrentUser),
    Redirect(&'static str),
}

pub fn authorize(session: &dyn SessionProvider, area: AdminArea) -> Access {
    match session.get() {
        None => Access::Redirect(LOGIN_PATH),
        Some(user) if area.allows(user.rol) => Access::Granted(user),
        Some(_) => Access::Redirect(area.fallback_path()),
    }
}

/// Page shown right after logging in or registering.
pub fn landing_path(role: Role) -> &'static str {
    if role.is_staff() {
        ADMIN_PATH
    } else {
        HOME_PATH
    }
}
