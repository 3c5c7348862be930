//! Checkout form validation

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Governorates offered by the checkout form's city selector.
pub const EGYPTIAN_CITIES: [&str; 22] = [
    "القاهرة",
    "الجيزة",
    "الأسكندرية",
    "الدقهلية",
    "الشرقية",
    "المنوفية",
    "القليوبية",
    "البحيرة",
    "الغربية",
    "بور سعيد",
    "دمياط",
    "الإسماعيلية",
    "السويس",
    "كفر الشيخ",
    "الفيوم",
    "بني سويف",
    "المنيا",
    "أسيوط",
    "سوهاج",
    "قنا",
    "الأقصر",
    "أسوان",
];

/// Local mobile numbers: a carrier prefix followed by eight digits.
#[expect(clippy::expect_used, reason = "pattern is a fixed literal")]
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(010|011|012|015)[0-9]{8}$").expect("phone pattern compiles")
});

/// Delivery and contact details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// First name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Mobile number
    pub phone: String,

    /// Contact email, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Governorate
    pub city: String,

    /// Street address
    pub address: String,

    /// Delivery notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Required checkout fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// First name
    FirstName,
    /// Family name
    LastName,
    /// Mobile number
    Phone,
    /// Governorate
    City,
    /// Street address
    Address,
}

impl Field {
    /// Required fields in validation order.
    pub const REQUIRED: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Phone,
        Self::City,
        Self::Address,
    ];

    /// Form field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::City => "city",
            Self::Address => "address",
        }
    }

    fn value(self, info: &CustomerInfo) -> &str {
        match self {
            Self::FirstName => &info.first_name,
            Self::LastName => &info.last_name,
            Self::Phone => &info.phone,
            Self::City => &info.city,
            Self::Address => &info.address,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Reasons a checkout form is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("missing required field: {0}")]
    MissingField(Field),

    /// The phone number is not a local mobile number.
    #[error("invalid phone number")]
    InvalidPhone,
}

impl ValidationError {
    /// Message shown to the shopper.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingField(_) => "يرجى ملء جميع الحقول المطلوبة",
            Self::InvalidPhone => "يرجى إدخال رقم هاتف مصري صحيح (مثال: 01012345678)",
        }
    }
}

/// Validate a checkout form.
///
/// Required fields are checked first, in [`Field::REQUIRED`] order, then the phone number.
/// The first failure wins. On success the form is returned with whitespace removed from the
/// phone number and otherwise unchanged.
///
/// # Errors
///
/// - [`ValidationError::MissingField`]: a required field is empty or blank.
/// - [`ValidationError::InvalidPhone`]: the phone number is not a local mobile number.
pub fn validate(info: &CustomerInfo) -> Result<CustomerInfo, ValidationError> {
    if let Some(field) = Field::REQUIRED
        .into_iter()
        .find(|field| field.value(info).trim().is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }

    let phone = normalize_phone(&info.phone);

    if !PHONE_PATTERN.is_match(&phone) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(CustomerInfo {
        phone,
        ..info.clone()
    })
}

fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}
