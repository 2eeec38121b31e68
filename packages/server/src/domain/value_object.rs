//! 値オブジェクト定義
//!
//! プロトコル上でやり取りされる識別子とタイムスタンプを型で表現します。
//! 生成時に検証を行い、不正な値がドメイン層に入り込むことを防ぎます。
//! ルーム ID・ユーザー ID はクライアントが指定する不透明な文字列であり、
//! 非空であること以外の検証は行いません。

use thiserror::Error;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// ルーム ID
///
/// レジストリの主キー。同じ ID を指定したクライアント同士が
/// 1 つの再生タイムラインを共有する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ユーザー ID
///
/// クライアントが申告する識別子。再接続をまたいだ一意性は保証されない。
/// ルーム内の一意性は生存判定によって担保される。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 表示名
///
/// ユーザー ID とは独立にプロセス全体で管理される。stats の users には
/// 設定されていれば表示名が、なければユーザー ID がそのまま載る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
