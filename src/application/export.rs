//! CSV export of a completed prediction.
//!
//! Exports are ephemeral artifacts produced on demand; there is no datastore
//! behind them. An export only exists once a successful prediction has
//! produced an [`Assessment`].

use std::path::{Path, PathBuf};

use crate::domain::Assessment;
use crate::ChurnscopeError;

const HEADER: &str = "Timestamp,Gender,SeniorCitizen,Partner,Dependents,Tenure_Months,\
PhoneService,MultipleLines,InternetService,OnlineSecurity,OnlineBackup,DeviceProtection,\
TechSupport,StreamingTV,StreamingMovies,Contract,PaperlessBilling,PaymentMethod,\
MonthlyCharges,TotalCharges,Churn_Prediction,Churn_Probability,Risk_Level";

/// Render an assessment as a single-row CSV document.
///
/// Every input field is included alongside the prediction label, the
/// probability at 4 decimal places and the derived risk tier. All field
/// values come from closed sets without commas, so no quoting is needed.
#[must_use]
pub fn export_csv(assessment: &Assessment) -> String {
    let c = &assessment.customer;
    let row = format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:.2},{:.2},{},{:.4},{}",
        assessment.created_at.format("%Y-%m-%d %H:%M:%S"),
        c.gender.as_str(),
        c.senior_citizen.as_str(),
        c.partner.as_str(),
        c.dependents.as_str(),
        c.tenure,
        c.phone_service.as_str(),
        c.multiple_lines.as_str(),
        c.internet_service.as_str(),
        c.online_security.as_str(),
        c.online_backup.as_str(),
        c.device_protection.as_str(),
        c.tech_support.as_str(),
        c.streaming_tv.as_str(),
        c.streaming_movies.as_str(),
        c.contract.as_str(),
        c.paperless_billing.as_str(),
        c.payment_method.as_str(),
        c.monthly_charges,
        c.total_charges,
        assessment.result.prediction,
        assessment.result.probability,
        assessment.risk_tier,
    );

    format!("{HEADER}\n{row}\n")
}

/// Write the export to `dir` as `churn_prediction_{timestamp}.csv`.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_export(assessment: &Assessment, dir: &Path) -> Result<PathBuf, ChurnscopeError> {
    let filename = format!(
        "churn_prediction_{}.csv",
        assessment.created_at.format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);

    std::fs::write(&path, export_csv(assessment))?;
    tracing::info!("Exported prediction to {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRecord, PredictionResult};

    fn assessment() -> Assessment {
        let mut record = CustomerRecord {
            tenure: 12,
            monthly_charges: 45.0,
            ..CustomerRecord::default()
        };
        record.recompute_total();
        Assessment::new(
            record,
            PredictionResult {
                prediction: "No".to_string(),
                probability: 0.2345678,
            },
        )
    }

    #[test]
    fn test_csv_contains_all_fields() {
        let csv = export_csv(&assessment());
        let mut lines = csv.lines();
        let header = lines.next().expect("Should have a header");
        let row = lines.next().expect("Should have a row");

        assert_eq!(header.split(',').count(), 23);
        assert_eq!(row.split(',').count(), 23);
        assert!(row.contains(",No,0.2346,LOW"));
        assert!(row.contains(",45.00,540.00,"));
        assert!(row.contains("Credit card (automatic)"));
    }

    #[test]
    fn test_probability_formatted_to_four_decimals() {
        let csv = export_csv(&assessment());
        assert!(csv.contains("0.2346"));
        assert!(!csv.contains("0.2345678"));
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = write_export(&assessment(), dir.path()).expect("Should write");

        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("churn_prediction_"));
        assert!(name.ends_with(".csv"));

        let contents = std::fs::read_to_string(&path).expect("Should read back");
        assert!(contents.starts_with("Timestamp,"));
    }
}
