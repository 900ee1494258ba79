//! # 필드 검증기
//!
//! 회원가입/프로필 입력을 규칙 테이블로 검증합니다. 규칙은 필드마다
//! `{필수 여부, 정규식, 최소 길이, 사용자 메시지}`로 구성됩니다.
//!
//! | 필드 | 필수 | 규칙 | 메시지 |
//! |------|------|------|--------|
//! | `username` | O | `^[a-zA-Z0-9_]{4,20}$` | 아이디는 4-20자의 영문, 숫자, 밑줄(_)만 사용 가능합니다 |
//! | `email` | X | `^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$` (ASCII) | 유효한 이메일 주소를 입력해주세요 |
//! | `password` | O | 8자 이상, 영문/숫자/특수문자(`@$!%*#?&`) 각 1개 이상 | 비밀번호는 8자 이상, 영문, 숫자, 특수문자를 포함해야 합니다 |
//! | `phone` | O | `^01[016789]-?\d{3,4}-?\d{4}$` | 올바른 휴대폰 번호를 입력해주세요 |
//! | `address` | O | 10자 이상 | 상세한 주소를 입력해주세요 |
//!
//! 두 가지 방식으로 사용합니다.
//!
//! - [`validate`]: 필드 하나를 검사 (입력 중 즉시 피드백)
//! - [`validate_all`]: 레코드 전체를 검사해 실패한 필드만 담은 맵 반환 (제출 직전)
//!
//! 아이디 중복 확인([`check_username_available`])은 형식 검사를 통과한 아이디에만
//! 수행하며, 저장소 조회가 실패하면 사용 가능으로 간주합니다(fail open).
//! 최종적인 유일성 보장은 저장소의 유니크 제약이 담당합니다.
//!
//! # 예제
//!
//! ```rust,ignore
//! use storefront_backend::services::validation::{validate, Field};
//!
//! assert!(validate(Field::Username, "ab_1").is_none());
//! assert!(validate(Field::Phone, "02-123-4567").is_some());
//! ```

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppResult, FieldErrors};

pub const REQUIRED_MESSAGE: &str = "필수 입력 항목입니다";
pub const DUPLICATE_USERNAME_MESSAGE: &str = "이미 사용 중인 아이디입니다";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "이미 사용 중인 이메일입니다";

const PASSWORD_SPECIALS: &str = "@$!%*#?&";

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{4,20}$").expect("username pattern"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").expect("email pattern")
});

// 허용 문자 집합만 정규식으로 검사하고, 문자 종류별 포함 여부는 password_has_required_classes가 검사
static PASSWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8,}$").expect("password pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01[016789]-?[0-9]{3,4}-?[0-9]{4}$").expect("phone pattern"));

/// 검증 대상 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    Phone,
    Address,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::Email,
        Field::Password,
        Field::Phone,
        Field::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|field| field.as_str() == s)
    }

    /// 검증 전에 적용하는 정규화. 비밀번호는 입력 그대로 검사합니다.
    fn normalize(self, value: &str) -> &str {
        match self {
            Field::Password => value,
            _ => value.trim(),
        }
    }
}

/// 필드 하나의 검증 규칙
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub pattern: Option<&'static Lazy<Regex>>,
    pub min_length: Option<usize>,
    /// 정규식으로 표현하지 않는 추가 조건
    pub extra: Option<fn(&str) -> bool>,
    pub message: &'static str,
}

static RULES: [FieldRule; 5] = [
    FieldRule {
        field: Field::Username,
        required: true,
        pattern: Some(&USERNAME_PATTERN),
        min_length: None,
        extra: None,
        message: "아이디는 4-20자의 영문, 숫자, 밑줄(_)만 사용 가능합니다",
    },
    FieldRule {
        field: Field::Email,
        required: false,
        pattern: Some(&EMAIL_PATTERN),
        min_length: None,
        extra: None,
        message: "유효한 이메일 주소를 입력해주세요",
    },
    FieldRule {
        field: Field::Password,
        required: true,
        pattern: Some(&PASSWORD_PATTERN),
        min_length: Some(8),
        extra: Some(password_has_required_classes),
        message: "비밀번호는 8자 이상, 영문, 숫자, 특수문자를 포함해야 합니다",
    },
    FieldRule {
        field: Field::Phone,
        required: true,
        pattern: Some(&PHONE_PATTERN),
        min_length: None,
        extra: None,
        message: "올바른 휴대폰 번호를 입력해주세요",
    },
    FieldRule {
        field: Field::Address,
        required: true,
        pattern: None,
        min_length: Some(10),
        extra: None,
        message: "상세한 주소를 입력해주세요",
    },
];

fn password_has_required_classes(value: &str) -> bool {
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    has_letter && has_digit && has_special
}

/// 필드의 검증 규칙
pub fn rule_for(field: Field) -> &'static FieldRule {
    RULES
        .iter()
        .find(|rule| rule.field == field)
        .unwrap_or(&RULES[0])
}

/// 필드 하나를 검증하고, 실패 시 사용자 메시지를 반환
pub fn validate(field: Field, value: &str) -> Option<&'static str> {
    let rule = rule_for(field);
    let value = field.normalize(value);

    if value.is_empty() {
        return rule.required.then_some(REQUIRED_MESSAGE);
    }

    if let Some(min_length) = rule.min_length {
        if value.chars().count() < min_length {
            return Some(rule.message);
        }
    }

    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return Some(rule.message);
        }
    }

    if let Some(extra) = rule.extra {
        if !extra(value) {
            return Some(rule.message);
        }
    }

    None
}

/// 검증 대상 레코드
///
/// 레코드가 담고 있는 필드만 반환합니다. 값이 없는 필드는 빈 문자열로 전달합니다.
pub trait ValidatedRecord {
    fn field_values(&self) -> Vec<(Field, &str)>;
}

/// 레코드 전체를 검증해 실패한 필드만 담은 맵을 반환
pub fn validate_all<R: ValidatedRecord + ?Sized>(record: &R) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, value) in record.field_values() {
        if let Some(message) = validate(field, value) {
            errors.insert(field.as_str(), message);
        }
    }
    errors
}

/// 아이디 존재 여부 조회
#[async_trait]
pub trait UsernameProbe: Send + Sync {
    async fn username_exists(&self, username: &str) -> AppResult<bool>;
}

/// 아이디 중복 사전 확인
///
/// 형식 검사를 통과한 아이디만 조회합니다. 이미 사용 중이면 중복 메시지를,
/// 사용 가능하거나 조회가 실패하면 `None`을 반환합니다.
pub async fn check_username_available<P>(probe: &P, username: &str) -> Option<&'static str>
where
    P: UsernameProbe + ?Sized,
{
    if validate(Field::Username, username).is_some() {
        return None;
    }

    match probe.username_exists(username.trim()).await {
        Ok(true) => Some(DUPLICATE_USERNAME_MESSAGE),
        Ok(false) => None,
        Err(e) => {
            log::warn!("아이디 중복 확인 실패, 사용 가능으로 처리합니다: {}", e);
            None
        }
    }
}
