//! # 用户服务
//!
//! 用户的创建、查询、更新和删除。删除用户时由数据库级联清理其衣橱、搭配、天气和商品推荐。

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash};
use chrono::Utc;
use entity::{users, users::Entity as Users};
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    ensure_valid,
    error::{Context, LazydrobeError, Result},
    lerror, linfo,
    logging::{LogComponent, LogStage},
    types::UserId,
};

use super::shared::{PaginationInfo, PaginationParams, TEXT_MAX_LEN, build_page, optional_text};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 6;

/// 创建用户请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// 明文密码，入库前哈希
    pub password: String,
    pub user_ip: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<Value>,
}

/// 更新用户请求，`None` 表示保持原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<Value>,
}

/// 用户服务
pub struct UsersService<'a> {
    db: &'a DatabaseConnection,
    password_cost: u32,
}

impl<'a> UsersService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            password_cost: DEFAULT_COST,
        }
    }

    /// 调整 bcrypt 成本
    #[must_use]
    pub const fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    const fn db(&self) -> &'a DatabaseConnection {
        self.db
    }

    /// 创建用户；邮箱重复时返回唯一约束冲突
    pub async fn create(&self, request: &CreateUserRequest) -> Result<users::Model> {
        let username = ensure_username(&request.username)?;
        let email = normalize_email(&request.email)?;
        ensure_password_strength(&request.password)?;
        let password = self.hash_password(&request.password)?;

        let model = users::ActiveModel {
            username: Set(username),
            email: Set(email.clone()),
            password: Set(password),
            user_ip: Set(optional_text("user_ip", request.user_ip.as_deref(), TEXT_MAX_LEN)?),
            location: Set(optional_text("location", request.location.as_deref(), TEXT_MAX_LEN)?),
            preferences: Set(request.preferences.clone()),
            date_joined: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let created = model
            .insert(self.db())
            .await
            .with_context(|| format!("创建用户失败: {email}"))?;

        linfo!(
            "system",
            LogStage::Write,
            LogComponent::Users,
            "create_user",
            &format!("用户已创建: id={} email={}", created.user_id, created.email)
        );
        Ok(created)
    }

    /// 获取单个用户
    pub async fn get(&self, user_id: UserId) -> Result<users::Model> {
        Users::find_by_id(user_id)
            .one(self.db())
            .await
            .context("查询用户失败")?
            .ok_or_else(|| LazydrobeError::not_found("users", user_id))
    }

    /// 按邮箱查找用户，比较前统一小写
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let email = email.trim().to_lowercase();
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db())
            .await
            .context("按邮箱查询用户失败")
    }

    /// 分页列出用户，按 ID 升序
    pub async fn list(&self, params: PaginationParams) -> Result<(Vec<users::Model>, PaginationInfo)> {
        let paginator = Users::find()
            .order_by_asc(users::Column::UserId)
            .paginate(self.db(), params.limit);
        let total = paginator.num_items().await.context("统计用户数量失败")?;
        if params.offset() >= total {
            return Ok((Vec::new(), build_page(total, params)));
        }
        let rows = paginator
            .fetch_page(params.page - 1)
            .await
            .context("分页查询用户失败")?;
        Ok((rows, build_page(total, params)))
    }

    /// 更新用户
    pub async fn update(&self, user_id: UserId, request: &UpdateUserRequest) -> Result<users::Model> {
        let user = self.get(user_id).await?;
        let mut active = user.into_active_model();

        if let Some(username) = &request.username {
            active.username = Set(ensure_username(username)?);
        }
        if let Some(email) = &request.email {
            active.email = Set(normalize_email(email)?);
        }
        if let Some(password) = &request.password {
            ensure_password_strength(password)?;
            active.password = Set(self.hash_password(password)?);
        }
        if let Some(location) = &request.location {
            active.location = Set(optional_text("location", Some(location), TEXT_MAX_LEN)?);
        }
        if let Some(preferences) = &request.preferences {
            active.preferences = Set(Some(preferences.clone()));
        }

        active
            .update(self.db())
            .await
            .with_context(|| format!("更新用户失败: {user_id}"))
    }

    /// 删除用户及其全部从属数据
    pub async fn delete(&self, user_id: UserId) -> Result<()> {
        let result = Users::delete_by_id(user_id)
            .exec(self.db())
            .await
            .with_context(|| format!("删除用户失败: {user_id}"))?;
        if result.rows_affected == 0 {
            return Err(LazydrobeError::not_found("users", user_id));
        }

        linfo!(
            "system",
            LogStage::Write,
            LogComponent::Users,
            "delete_user",
            &format!("用户已删除: id={user_id}")
        );
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.password_cost).map_err(|err| {
            lerror!(
                "system",
                LogStage::Write,
                LogComponent::Users,
                "password_hash_fail",
                &format!("Failed to hash password: {err}")
            );
            LazydrobeError::validation("密码加密失败", Some("password"))
        })
    }
}

fn ensure_username(username: &str) -> Result<String> {
    let username = username.trim();
    let len = username.chars().count();
    ensure_valid!(
        (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len),
        "username",
        "用户名长度必须在 {} 到 {} 个字符之间",
        USERNAME_MIN_LEN,
        USERNAME_MAX_LEN
    );
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    ensure_valid!(
        EMAIL_RE.is_match(&email) && email.len() <= TEXT_MAX_LEN,
        "email",
        "邮箱格式无效: {}",
        email
    );
    Ok(email)
}

fn ensure_password_strength(password: &str) -> Result<()> {
    ensure_valid!(
        password.chars().count() >= PASSWORD_MIN_LEN,
        "password",
        "密码长度至少{}字符",
        PASSWORD_MIN_LEN
    );
    Ok(())
}
