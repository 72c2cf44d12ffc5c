//! Structural validation of submitted tire requests
//!
//! Validation accumulates every violation into a list of human-readable
//! messages rather than failing fast: the frontend renders the full list.
//! `auto_populate` runs first so derived fields can satisfy the required
//! checks.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::models::TireRequest;

const MAX_VEHICLE_NO_LENGTH: usize = 8;
const MAX_TIRE_QUANTITY: i64 = 50;
const MAX_TUBE_QUANTITY: i64 = 50;
const MAX_COMMENT_LENGTH: usize = 500;
pub const MAX_PHOTO_SIZE_BYTES: usize = 5 * 1024 * 1024;

fn email_pattern() -> &'static Regex {
    static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.\-]+@.+$").expect("email pattern is a valid regex")
    })
}

/// One uploaded photo, as received from the multipart form. Only the declared
/// metadata is validated here; byte-level signature checks happen at intake.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub size: usize,
}

/// Validate a request, returning every violated rule. An empty list means
/// the request is valid.
pub fn validate(request: &TireRequest) -> Vec<String> {
    let mut errors = Vec::new();

    validate_vehicle_number(&request.vehicle_no, &mut errors);
    validate_user_section(&request.user_section, &mut errors);
    validate_replacement_date(&request.replacement_date, &mut errors);
    validate_tire_quantity(&request.no_of_tires, &mut errors);
    validate_tube_quantity(&request.no_of_tubes, &mut errors);
    validate_cost_center(&request.cost_center, &mut errors);
    validate_officer_service_number(&request.officer_service_no, &mut errors);
    validate_email(&request.email, &mut errors);
    validate_comments(request.comments.as_deref(), &mut errors);

    errors
}

fn validate_vehicle_number(vehicle_no: &str, errors: &mut Vec<String>) {
    if vehicle_no.trim().is_empty() {
        errors.push("Vehicle number is required".to_string());
    } else if vehicle_no.chars().count() > MAX_VEHICLE_NO_LENGTH {
        errors.push(format!(
            "Vehicle number cannot exceed {} characters",
            MAX_VEHICLE_NO_LENGTH
        ));
    }
}

fn validate_user_section(user_section: &str, errors: &mut Vec<String>) {
    if user_section.trim().is_empty() {
        errors.push("User section is required and cannot be empty".to_string());
    }
}

fn validate_replacement_date(replacement_date: &str, errors: &mut Vec<String>) {
    if replacement_date.trim().is_empty() {
        errors.push("Replacement date is required".to_string());
        return;
    }

    match NaiveDate::parse_from_str(replacement_date.trim(), "%Y-%m-%d") {
        Ok(date) => {
            if date > Utc::now().date_naive() {
                errors.push("Replacement date cannot be in the future".to_string());
            }
        }
        Err(_) => {
            errors.push(
                "Invalid replacement date format. Please use yyyy-MM-dd format".to_string(),
            );
        }
    }
}

fn validate_tire_quantity(no_of_tires: &str, errors: &mut Vec<String>) {
    if no_of_tires.trim().is_empty() {
        errors.push("Number of tires is required".to_string());
        return;
    }

    match no_of_tires.trim().parse::<i64>() {
        Ok(quantity) if quantity < 1 => {
            errors.push("Number of tires must be at least 1".to_string());
        }
        Ok(quantity) if quantity > MAX_TIRE_QUANTITY => {
            errors.push(format!("Number of tires cannot exceed {}", MAX_TIRE_QUANTITY));
        }
        Ok(_) => {}
        Err(_) => {
            errors.push("Number of tires must be a valid number".to_string());
        }
    }
}

fn validate_tube_quantity(no_of_tubes: &str, errors: &mut Vec<String>) {
    // Tubes are optional
    if no_of_tubes.trim().is_empty() {
        return;
    }

    match no_of_tubes.trim().parse::<i64>() {
        Ok(quantity) if quantity < 0 => {
            errors.push("Number of tubes cannot be negative".to_string());
        }
        Ok(quantity) if quantity > MAX_TUBE_QUANTITY => {
            errors.push(format!("Number of tubes cannot exceed {}", MAX_TUBE_QUANTITY));
        }
        Ok(_) => {}
        Err(_) => {
            errors.push("Number of tubes must be a valid number".to_string());
        }
    }
}

fn validate_cost_center(cost_center: &str, errors: &mut Vec<String>) {
    if cost_center.trim().is_empty() {
        errors.push(
            "Cost center should be automatically filled according to registered data".to_string(),
        );
    }
}

fn validate_officer_service_number(officer_service_no: &str, errors: &mut Vec<String>) {
    if officer_service_no.trim().is_empty() {
        errors.push(
            "Officer service number should be automatically filled according to registered data"
                .to_string(),
        );
    }
}

fn validate_email(email: &str, errors: &mut Vec<String>) {
    if email.trim().is_empty() {
        errors.push(
            "Email should be automatically filled according to registered data".to_string(),
        );
    } else if !email_pattern().is_match(email.trim()) {
        errors.push("Please provide a valid email address".to_string());
    }
}

fn validate_comments(comments: Option<&str>, errors: &mut Vec<String>) {
    if let Some(comments) = comments {
        if comments.chars().count() > MAX_COMMENT_LENGTH {
            errors.push(format!(
                "Comments cannot exceed {} characters",
                MAX_COMMENT_LENGTH
            ));
        }
    }
}

/// Validate a batch of uploaded photos: declared content type must be an
/// image type, size must stay under the limit. All violations accumulate.
pub fn validate_photo_uploads(photos: &[PhotoUpload]) -> Vec<String> {
    let mut errors = Vec::new();

    for photo in photos {
        if photo.size > MAX_PHOTO_SIZE_BYTES {
            errors.push(format!(
                "Image file size must be less than 5MB. Current file: {} ({})",
                photo.filename,
                format_file_size(photo.size)
            ));
        }

        let content_type = photo.content_type.to_lowercase();
        if !content_type.starts_with("image/") {
            errors.push(format!(
                "Only image files are allowed. Invalid file: {}",
                photo.filename
            ));
        } else if !matches!(
            content_type.as_str(),
            "image/jpeg" | "image/jpg" | "image/png" | "image/gif"
        ) {
            errors.push(format!(
                "Only JPEG, PNG, and GIF image formats are supported. Invalid file: {}",
                photo.filename
            ));
        }
    }

    errors
}

fn format_file_size(size: usize) -> String {
    if size >= 1024 * 1024 {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    } else if size >= 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{} bytes", size)
    }
}

/// Fill the derived fields when the submitter left them blank. The values are
/// deterministic placeholders: the real registry lookup lives outside this
/// system.
pub fn auto_populate(request: &mut TireRequest) {
    if request.cost_center.trim().is_empty() {
        request.cost_center = cost_center_for_section(&request.user_section);
    }

    if request.officer_service_no.trim().is_empty() {
        request.officer_service_no = placeholder_service_number(&request.user_section);
    }

    if request.email.trim().is_empty() {
        request.email = format!("{}@company.com", request.officer_service_no.to_lowercase());
    }
}

fn cost_center_for_section(user_section: &str) -> String {
    match user_section {
        "IT" => "IT-001",
        "HR" => "HR-001",
        "Finance" => "FIN-001",
        "Operations" => "OPS-001",
        _ => "GEN-001",
    }
    .to_string()
}

fn placeholder_service_number(user_section: &str) -> String {
    let seed: u32 = user_section
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    format!("SVC-{:04}", seed % 10000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_request() -> TireRequest {
        let mut request = TireRequest::new();
        request.vehicle_no = "WP-1234".to_string();
        request.user_section = "IT".to_string();
        request.replacement_date = "2024-01-15".to_string();
        request.no_of_tires = "4".to_string();
        request.no_of_tubes = "2".to_string();
        request.cost_center = "IT-001".to_string();
        request.officer_service_no = "SVC-1234".to_string();
        request.email = "driver@company.com".to_string();
        request
    }

    #[test]
    fn valid_request_produces_no_errors() {
        assert!(validate(&valid_request()).is_empty());
    }

    #[test]
    fn missing_vehicle_number() {
        let mut request = valid_request();
        request.vehicle_no = "  ".to_string();
        assert!(validate(&request).contains(&"Vehicle number is required".to_string()));
    }

    #[test]
    fn vehicle_number_too_long() {
        let mut request = valid_request();
        request.vehicle_no = "WP-123456".to_string();
        assert!(validate(&request)
            .contains(&"Vehicle number cannot exceed 8 characters".to_string()));
    }

    #[test]
    fn missing_user_section() {
        let mut request = valid_request();
        request.user_section = String::new();
        assert!(validate(&request)
            .contains(&"User section is required and cannot be empty".to_string()));
    }

    #[test]
    fn missing_replacement_date() {
        let mut request = valid_request();
        request.replacement_date = String::new();
        assert!(validate(&request).contains(&"Replacement date is required".to_string()));
    }

    #[test]
    fn unparseable_replacement_date() {
        let mut request = valid_request();
        request.replacement_date = "15/01/2024".to_string();
        assert!(validate(&request)
            .contains(&"Invalid replacement date format. Please use yyyy-MM-dd format".to_string()));
    }

    #[test]
    fn future_replacement_date_rejected() {
        let mut request = valid_request();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        request.replacement_date = tomorrow.format("%Y-%m-%d").to_string();
        assert!(validate(&request)
            .contains(&"Replacement date cannot be in the future".to_string()));
    }

    #[test]
    fn todays_replacement_date_accepted() {
        let mut request = valid_request();
        request.replacement_date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn tire_quantity_bounds() {
        let mut request = valid_request();
        request.no_of_tires = "0".to_string();
        assert!(validate(&request).contains(&"Number of tires must be at least 1".to_string()));

        request.no_of_tires = "51".to_string();
        assert!(validate(&request).contains(&"Number of tires cannot exceed 50".to_string()));

        request.no_of_tires = "four".to_string();
        assert!(validate(&request).contains(&"Number of tires must be a valid number".to_string()));

        request.no_of_tires = String::new();
        assert!(validate(&request).contains(&"Number of tires is required".to_string()));
    }

    #[test]
    fn tube_quantity_is_optional_but_bounded() {
        let mut request = valid_request();
        request.no_of_tubes = String::new();
        assert!(validate(&request).is_empty());

        request.no_of_tubes = "-1".to_string();
        assert!(validate(&request).contains(&"Number of tubes cannot be negative".to_string()));

        request.no_of_tubes = "51".to_string();
        assert!(validate(&request).contains(&"Number of tubes cannot exceed 50".to_string()));
    }

    #[test]
    fn email_shape_is_checked() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert!(validate(&request).contains(&"Please provide a valid email address".to_string()));
    }

    #[test]
    fn comments_length_is_bounded() {
        let mut request = valid_request();
        request.comments = Some("x".repeat(501));
        assert!(validate(&request).contains(&"Comments cannot exceed 500 characters".to_string()));

        request.comments = Some("x".repeat(500));
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn violations_accumulate_instead_of_failing_fast() {
        let request = TireRequest::new();
        let errors = validate(&request);
        assert!(errors.len() >= 5, "expected many violations, got {errors:?}");
    }

    #[test]
    fn auto_populate_fills_blank_derived_fields() {
        let mut request = TireRequest::new();
        request.user_section = "Finance".to_string();
        auto_populate(&mut request);

        assert_eq!(request.cost_center, "FIN-001");
        assert!(request.officer_service_no.starts_with("SVC-"));
        assert!(request.email.ends_with("@company.com"));
        assert_eq!(
            request.email,
            format!("{}@company.com", request.officer_service_no.to_lowercase())
        );
    }

    #[test]
    fn auto_populate_is_deterministic() {
        let mut a = TireRequest::new();
        a.user_section = "Operations".to_string();
        let mut b = TireRequest::new();
        b.user_section = "Operations".to_string();

        auto_populate(&mut a);
        auto_populate(&mut b);
        assert_eq!(a.officer_service_no, b.officer_service_no);
        assert_eq!(a.cost_center, "OPS-001");
    }

    #[test]
    fn auto_populate_preserves_provided_values() {
        let mut request = TireRequest::new();
        request.user_section = "IT".to_string();
        request.cost_center = "CUSTOM-9".to_string();
        request.officer_service_no = "SVC-7777".to_string();
        request.email = "me@company.com".to_string();

        auto_populate(&mut request);
        assert_eq!(request.cost_center, "CUSTOM-9");
        assert_eq!(request.officer_service_no, "SVC-7777");
        assert_eq!(request.email, "me@company.com");
    }

    #[test]
    fn unknown_section_falls_back_to_generic_cost_center() {
        let mut request = TireRequest::new();
        request.user_section = "Logistics".to_string();
        auto_populate(&mut request);
        assert_eq!(request.cost_center, "GEN-001");
    }

    #[test]
    fn photo_upload_size_limit() {
        let photos = vec![PhotoUpload {
            filename: "tire.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size: 6 * 1024 * 1024,
        }];
        let errors = validate_photo_uploads(&photos);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("less than 5MB"));
        assert!(errors[0].contains("6.00 MB"));
    }

    #[test]
    fn photo_upload_content_type_checks() {
        let photos = vec![
            PhotoUpload {
                filename: "notes.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                size: 1024,
            },
            PhotoUpload {
                filename: "scan.tiff".to_string(),
                content_type: "image/tiff".to_string(),
                size: 1024,
            },
            PhotoUpload {
                filename: "ok.png".to_string(),
                content_type: "image/png".to_string(),
                size: 1024,
            },
        ];
        let errors = validate_photo_uploads(&photos);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Only image files are allowed"));
        assert!(errors[1].contains("Only JPEG, PNG, and GIF"));
    }

    #[test]
    fn photo_upload_violations_accumulate() {
        let photos = vec![PhotoUpload {
            filename: "huge.bmp".to_string(),
            content_type: "image/bmp".to_string(),
            size: 10 * 1024 * 1024,
        }];
        // Oversized AND unsupported format: both violations reported.
        assert_eq!(validate_photo_uploads(&photos).len(), 2);
    }
}
