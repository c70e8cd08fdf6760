use crate::error::EstimateError;
use crate::request::EstimateRequest;

pub fn validate_request(request: &EstimateRequest) -> Result<(), EstimateError> {
    if request.floors_above < 1 {
        return Err(EstimateError::invalid_input(
            "floors_above",
            format!("{} (must be at least 1)", request.floors_above),
        ));
    }
    if request.floors_below < 0 {
        return Err(EstimateError::invalid_input(
            "floors_below",
            format!("{} (must be non-negative)", request.floors_below),
        ));
    }
    if !request.site_area.is_finite() || request.site_area <= 0.0 {
        return Err(EstimateError::invalid_input(
            "site_area",
            format!("{} (must be positive)", request.site_area),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_valid() {
        assert!(validate_request(&EstimateRequest::default()).is_ok());
    }

    #[test]
    fn zero_floors_above_is_rejected() {
        let mut request = EstimateRequest::default();
        request.floors_above = 0;
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(
            err,
            EstimateError::InvalidInput {
                field: "floors_above",
                ..
            }
        ));
    }

    #[test]
    fn negative_basement_count_is_rejected() {
        let mut request = EstimateRequest::default();
        request.floors_below = -1;
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn non_positive_site_area_is_rejected() {
        let mut request = EstimateRequest::default();
        request.site_area = 0.0;
        assert!(validate_request(&request).is_err());
        request.site_area = f64::NAN;
        assert!(validate_request(&request).is_err());
    }
}
