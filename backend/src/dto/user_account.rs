use board_adapters::{NewUserAccount, UserAccount};
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccountDto {
    pub id: i64,
    pub user_id: String,
    pub user_password: String,
    pub email: String,
    pub nickname: Option<String>,
    pub memo: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub modified_at: NaiveDateTime,
    pub modified_by: String,
}

impl UserAccountDto {
    /// An account that is not stored yet. `id` is 0 and the account audits itself.
    pub fn of(
        user_id: impl Into<String>,
        user_password: impl Into<String>,
        email: impl Into<String>,
        nickname: Option<String>,
        memo: Option<String>,
    ) -> Self {
        let user_id = user_id.into();
        let now = Local::now().naive_local();
        Self {
            id: 0,
            user_password: user_password.into(),
            email: email.into(),
            nickname,
            memo,
            created_at: now,
            created_by: user_id.clone(),
            modified_at: now,
            modified_by: user_id.clone(),
            user_id,
        }
    }

    pub fn to_new_entity(&self) -> NewUserAccount {
        NewUserAccount {
            user_id: self.user_id.clone(),
            user_password: self.user_password.clone(),
            email: self.email.clone(),
            nickname: self.nickname.clone(),
            memo: self.memo.clone(),
        }
    }

    pub fn from_entity(entity: &UserAccount) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id.clone(),
            user_password: entity.user_password.clone(),
            email: entity.email.clone(),
            nickname: entity.nickname.clone(),
            memo: entity.memo.clone(),
            created_at: entity.audit.created_at,
            created_by: entity.audit.created_by.clone(),
            modified_at: entity.audit.modified_at,
            modified_by: entity.audit.modified_by.clone(),
        }
    }

    /// Nickname when set, otherwise the login id.
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.trim().is_empty() => nickname,
            _ => &self.user_id,
        }
    }
}
