//! Customer record types for churn prediction.
//!
//! Field names and value spellings mirror the wire format of the remote
//! prediction service (Telco-style customer attributes).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Customer gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Binary Yes/No attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [Self; 2] = [Self::Yes, Self::No];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    #[must_use]
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Multiple-lines attribute; only meaningful when phone service is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleLines {
    Yes,
    No,
    #[serde(rename = "No phone service")]
    NoPhoneService,
}

impl MultipleLines {
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::NoPhoneService];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NoPhoneService => "No phone service",
        }
    }
}

/// Internet service variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    No,
}

impl InternetService {
    pub const ALL: [Self; 3] = [Self::Dsl, Self::FiberOptic, Self::No];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }
}

/// Internet add-on attribute (security, backup, streaming, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternetAddon {
    Yes,
    No,
    #[serde(rename = "No internet service")]
    NoInternetService,
}

impl InternetAddon {
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::NoInternetService];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NoInternetService => "No internet service",
        }
    }
}

/// Contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Contract {
    pub const ALL: [Self; 3] = [Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic check")]
    ElectronicCheck,
    #[serde(rename = "Mailed check")]
    MailedCheck,
    #[serde(rename = "Bank transfer (automatic)")]
    BankTransfer,
    #[serde(rename = "Credit card (automatic)")]
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [Self; 4] = [
        Self::ElectronicCheck,
        Self::MailedCheck,
        Self::BankTransfer,
        Self::CreditCard,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Electronic check",
            Self::MailedCheck => "Mailed check",
            Self::BankTransfer => "Bank transfer (automatic)",
            Self::CreditCard => "Credit card (automatic)",
        }
    }
}

/// The form payload sent to the prediction service.
///
/// Serializes to the flat key/value object the service expects; field names
/// are fixed by the remote API and must not change. `total_charges` is always
/// derived from `monthly_charges * tenure` at submission time, never entered
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub gender: Gender,

    /// Sent on the wire as 0/1, not "Yes"/"No".
    #[serde(
        rename = "SeniorCitizen",
        serialize_with = "serialize_flag",
        deserialize_with = "deserialize_flag"
    )]
    pub senior_citizen: YesNo,

    #[serde(rename = "Partner")]
    pub partner: YesNo,

    #[serde(rename = "Dependents")]
    pub dependents: YesNo,

    /// Subscription length in months (0-100).
    pub tenure: u32,

    #[serde(rename = "PhoneService")]
    pub phone_service: YesNo,

    #[serde(rename = "MultipleLines")]
    pub multiple_lines: MultipleLines,

    #[serde(rename = "InternetService")]
    pub internet_service: InternetService,

    #[serde(rename = "OnlineSecurity")]
    pub online_security: InternetAddon,

    #[serde(rename = "OnlineBackup")]
    pub online_backup: InternetAddon,

    #[serde(rename = "DeviceProtection")]
    pub device_protection: InternetAddon,

    #[serde(rename = "TechSupport")]
    pub tech_support: InternetAddon,

    #[serde(rename = "StreamingTV")]
    pub streaming_tv: InternetAddon,

    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: InternetAddon,

    #[serde(rename = "Contract")]
    pub contract: Contract,

    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: YesNo,

    #[serde(rename = "PaymentMethod")]
    pub payment_method: PaymentMethod,

    /// Monthly charges in currency units.
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,

    /// Derived: monthly_charges * tenure.
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
}

fn serialize_flag<S: Serializer>(value: &YesNo, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(match value {
        YesNo::Yes => 1,
        YesNo::No => 0,
    })
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<YesNo, D::Error> {
    match u8::deserialize(deserializer)? {
        0 => Ok(YesNo::No),
        1 => Ok(YesNo::Yes),
        other => Err(serde::de::Error::custom(format!(
            "SeniorCitizen must be 0 or 1, got {other}"
        ))),
    }
}

impl Default for CustomerRecord {
    /// Neutral customer: no service add-ons, no risk-factor conditions active.
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            senior_citizen: YesNo::No,
            partner: YesNo::Yes,
            dependents: YesNo::Yes,
            tenure: 0,
            phone_service: YesNo::Yes,
            multiple_lines: MultipleLines::No,
            internet_service: InternetService::Dsl,
            online_security: InternetAddon::Yes,
            online_backup: InternetAddon::No,
            device_protection: InternetAddon::No,
            tech_support: InternetAddon::No,
            streaming_tv: InternetAddon::No,
            streaming_movies: InternetAddon::No,
            contract: Contract::OneYear,
            paperless_billing: YesNo::No,
            payment_method: PaymentMethod::CreditCard,
            monthly_charges: 0.0,
            total_charges: 0.0,
        }
    }
}

impl CustomerRecord {
    /// Total charges as derived from the other two numeric fields.
    #[must_use]
    pub fn derived_total(&self) -> f64 {
        self.monthly_charges * f64::from(self.tenure)
    }

    /// Recompute `total_charges` from monthly charges and tenure.
    ///
    /// Invariant: called at the moment of submission so the wire value can
    /// never drift from its inputs.
    pub fn recompute_total(&mut self) {
        self.total_charges = self.derived_total();
    }

    /// Validate numeric fields against the service's accepted ranges.
    ///
    /// Every rule runs independently; all violations are collected. Returns an
    /// empty vector when the record is valid. Never touches the network.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tenure > 100 {
            errors.push("Tenure must be between 0 and 100 months".to_string());
        }
        if !(self.monthly_charges > 0.0 && self.monthly_charges <= 1000.0) {
            errors.push("Monthly charges must be between 0 and 1000".to_string());
        }
        if !(0.0..=100_000.0).contains(&self.total_charges) {
            errors.push("Total charges must be between 0 and 100,000".to_string());
        }

        errors
    }

    /// Rule-based churn risk indicators, in fixed priority order.
    ///
    /// A presentation-oriented checklist, not derived from the model's
    /// decision boundary. At most 6 factors are returned.
    #[must_use]
    pub fn risk_factors(&self) -> Vec<&'static str> {
        let mut factors = Vec::new();

        if self.senior_citizen.is_yes() {
            factors.push("Senior citizen");
        }
        if self.partner == YesNo::No {
            factors.push("No partner");
        }
        if self.dependents == YesNo::No {
            factors.push("No dependents");
        }
        if self.tenure < 12 {
            factors.push("Short tenure");
        }
        if self.contract == Contract::MonthToMonth {
            factors.push("Month-to-month contract");
        }
        if self.payment_method == PaymentMethod::ElectronicCheck {
            factors.push("Electronic check payment");
        }
        if self.monthly_charges > 80.0 {
            factors.push("High monthly charges");
        }
        if self.internet_service == InternetService::FiberOptic
            && self.online_security == InternetAddon::No
        {
            factors.push("No online security with fiber");
        }
        if self.paperless_billing.is_yes() {
            factors.push("Paperless billing");
        }

        factors.truncate(6);
        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> CustomerRecord {
        CustomerRecord {
            tenure: 12,
            monthly_charges: 45.0,
            total_charges: 540.0,
            ..CustomerRecord::default()
        }
    }

    #[test]
    fn test_derived_total() {
        let mut record = CustomerRecord {
            tenure: 12,
            monthly_charges: 45.0,
            ..CustomerRecord::default()
        };
        record.recompute_total();
        assert!((record.total_charges - 540.0).abs() < f64::EPSILON);

        record.tenure = 7;
        record.monthly_charges = 19.99;
        record.recompute_total();
        assert!((record.total_charges - 19.99 * 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        assert!(valid_record().validate().is_empty());
    }

    #[test]
    fn test_validation_boundaries() {
        let mut record = valid_record();
        record.tenure = 100;
        assert!(record.validate().is_empty());
        record.tenure = 101;
        assert_eq!(
            record.validate(),
            vec!["Tenure must be between 0 and 100 months".to_string()]
        );

        let mut record = valid_record();
        record.monthly_charges = 1000.0;
        record.total_charges = record.derived_total();
        assert!(record.validate().is_empty());
        record.monthly_charges = 0.0;
        record.total_charges = 0.0;
        assert_eq!(
            record.validate(),
            vec!["Monthly charges must be between 0 and 1000".to_string()]
        );

        let mut record = valid_record();
        record.total_charges = 100_000.0;
        assert!(record.validate().is_empty());
        record.total_charges = 100_000.5;
        assert_eq!(
            record.validate(),
            vec!["Total charges must be between 0 and 100,000".to_string()]
        );
    }

    #[test]
    fn test_violations_compose_additively() {
        let record = CustomerRecord {
            tenure: 150,
            monthly_charges: -5.0,
            total_charges: 540.0,
            ..CustomerRecord::default()
        };
        let errors = record.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"Tenure must be between 0 and 100 months".to_string()));
        assert!(errors.contains(&"Monthly charges must be between 0 and 1000".to_string()));
    }

    #[test]
    fn test_wire_format_field_names() {
        let mut record = CustomerRecord {
            senior_citizen: YesNo::Yes,
            tenure: 12,
            monthly_charges: 45.0,
            internet_service: InternetService::FiberOptic,
            contract: Contract::MonthToMonth,
            payment_method: PaymentMethod::BankTransfer,
            multiple_lines: MultipleLines::NoPhoneService,
            online_security: InternetAddon::NoInternetService,
            ..CustomerRecord::default()
        };
        record.recompute_total();

        let value = serde_json::to_value(&record).expect("Should serialize");
        assert_eq!(value["gender"], "Male");
        assert_eq!(value["SeniorCitizen"], 1);
        assert_eq!(value["Partner"], "Yes");
        assert_eq!(value["tenure"], 12);
        assert_eq!(value["MultipleLines"], "No phone service");
        assert_eq!(value["InternetService"], "Fiber optic");
        assert_eq!(value["OnlineSecurity"], "No internet service");
        assert_eq!(value["Contract"], "Month-to-month");
        assert_eq!(value["PaymentMethod"], "Bank transfer (automatic)");
        assert_eq!(value["MonthlyCharges"], 45.0);
        assert_eq!(value["TotalCharges"], 540.0);

        // Round-trips through the 0/1 flag encoding.
        let back: CustomerRecord = serde_json::from_value(value).expect("Should deserialize");
        assert_eq!(back.senior_citizen, YesNo::Yes);
    }

    #[test]
    fn test_risk_factors_priority_order() {
        let record = CustomerRecord {
            senior_citizen: YesNo::Yes,
            partner: YesNo::No,
            tenure: 5,
            contract: Contract::MonthToMonth,
            monthly_charges: 45.0,
            total_charges: 225.0,
            ..CustomerRecord::default()
        };
        let factors = record.risk_factors();
        assert_eq!(
            factors,
            vec![
                "Senior citizen",
                "No partner",
                "Short tenure",
                "Month-to-month contract",
            ]
        );
    }

    #[test]
    fn test_risk_factors_truncated_to_six() {
        // All nine conditions hold; only the first six survive.
        let record = CustomerRecord {
            senior_citizen: YesNo::Yes,
            partner: YesNo::No,
            dependents: YesNo::No,
            tenure: 3,
            contract: Contract::MonthToMonth,
            payment_method: PaymentMethod::ElectronicCheck,
            monthly_charges: 95.0,
            internet_service: InternetService::FiberOptic,
            online_security: InternetAddon::No,
            paperless_billing: YesNo::Yes,
            ..CustomerRecord::default()
        };
        let factors = record.risk_factors();
        assert_eq!(factors.len(), 6);
        assert_eq!(factors[0], "Senior citizen");
        assert_eq!(factors[5], "Electronic check payment");
    }

    #[test]
    fn test_neutral_record_has_no_factors_beyond_tenure() {
        let record = CustomerRecord {
            tenure: 24,
            monthly_charges: 45.0,
            total_charges: 1080.0,
            ..CustomerRecord::default()
        };
        assert!(record.risk_factors().is_empty());
    }
}
