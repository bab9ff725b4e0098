//! Treatment advice for detection verdicts.

/// Advice attached to every healthy verdict.
pub const HEALTHY_ADVICE: &str = "Continue regular maintenance and monitoring.";

/// Fallback for diseases the table does not know.
pub const DEFAULT_DISEASE_ADVICE: &str =
    "Consult with a plant pathologist for treatment options.";

/// Treatment advice for a named disease.
///
/// Unrecognized names get the generic referral so a diseased verdict always
/// carries something actionable.
pub fn advice_for_disease(disease: &str) -> &'static str {
    match disease {
        "Apple Scab" => {
            "Apply fungicide specifically targeting scab. Remove fallen leaves to reduce spread."
        }
        "Apple Rust" => {
            "Apply fungicide designed for rust diseases. Remove nearby juniper plants if present."
        }
        _ => DEFAULT_DISEASE_ADVICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scab_gets_scab_treatment() {
        assert_eq!(
            advice_for_disease("Apple Scab"),
            "Apply fungicide specifically targeting scab. Remove fallen leaves to reduce spread."
        );
    }

    #[test]
    fn rust_gets_rust_treatment() {
        assert_eq!(
            advice_for_disease("Apple Rust"),
            "Apply fungicide designed for rust diseases. Remove nearby juniper plants if present."
        );
    }

    #[test]
    fn unknown_disease_gets_pathologist_referral() {
        assert_eq!(
            advice_for_disease("Unknown Disease"),
            "Consult with a plant pathologist for treatment options."
        );
        assert_eq!(advice_for_disease(""), DEFAULT_DISEASE_ADVICE);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        // Disease names come from a prompt that pins the exact spelling.
        assert_eq!(advice_for_disease("apple scab"), DEFAULT_DISEASE_ADVICE);
    }
}
