use crate::auth::token::Claims;

use super::user;

/// An authenticated request's session, decoded from its token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: user::Id,
}

impl TryFrom<Claims> for Session {
    type Error = std::num::ParseIntError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Session {
            user_id: claims.sub.parse()?,
        })
    }
}
