//! Booking and payment DTOs
//!
//! JSON field names follow the public API contract (camelCase, charger
//! references embedded under `chargerId`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::availability::TimeRange;
use crate::domain::{BookingRecord, Charger, Payment, User};

/// Request body for `POST /chargers/{id}/booking`
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingRequest {
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

impl BookingRequest {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// Request body for `POST /chargers/{id}/payment`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentRequest {
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    /// Card number, digits only
    #[serde(rename = "cardNumber")]
    #[validate(length(min = 12, max = 19))]
    pub card_number: String,
    #[validate(length(min = 3, max = 4))]
    pub cvc: String,
    #[validate(range(min = 1, max = 12))]
    pub exp_month: u8,
    #[validate(range(min = 2020, max = 2100))]
    pub exp_year: u16,
    /// ISO 4217 currency code
    #[validate(length(equal = 3))]
    pub currency: String,
}

impl PaymentRequest {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// Charger summary embedded in booking and payment responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ChargerDto {
    pub id: String,
    #[serde(rename = "chargerName")]
    pub charger_name: String,
    pub location: Option<String>,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: Decimal,
    #[serde(rename = "companyId")]
    pub company_id: String,
}

impl From<Charger> for ChargerDto {
    fn from(c: Charger) -> Self {
        Self {
            id: c.id,
            charger_name: c.name,
            location: c.location,
            price_per_hour: c.price_per_hour,
            company_id: c.provider_id,
        }
    }
}

/// Charger detail with its occupied schedule
#[derive(Debug, Serialize, ToSchema)]
pub struct ChargerDetailDto {
    #[serde(flatten)]
    pub charger: ChargerDto,
    #[serde(rename = "unavailableTimes")]
    pub unavailable_times: Vec<TimeRange>,
}

/// One booking record with the referenced charger embedded
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingHourDto {
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    pub status: String,
    #[serde(rename = "chargerId")]
    pub charger: Option<ChargerDto>,
}

impl BookingHourDto {
    pub fn from_record(record: BookingRecord, charger: Option<Charger>) -> Self {
        Self {
            start_time: record.range.start,
            end_time: record.range.end,
            status: record.status.as_str().to_string(),
            charger: charger.map(ChargerDto::from),
        }
    }
}

/// One booking record with a plain charger reference
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingSlotDto {
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    pub status: String,
    #[serde(rename = "chargerId")]
    pub charger_id: String,
}

impl From<BookingRecord> for BookingSlotDto {
    fn from(record: BookingRecord) -> Self {
        Self {
            start_time: record.range.start,
            end_time: record.range.end,
            status: record.status.as_str().to_string(),
            charger_id: record.charger_id,
        }
    }
}

/// The caller's account with booking records, ascending by start time
#[derive(Debug, Serialize, ToSchema)]
pub struct UserBookingDetailDto {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "bookingHours")]
    pub booking_hours: Vec<BookingHourDto>,
}

impl UserBookingDetailDto {
    pub fn new(user: User, records: Vec<(BookingRecord, Option<Charger>)>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            booking_hours: records
                .into_iter()
                .map(|(record, charger)| BookingHourDto::from_record(record, charger))
                .collect(),
        }
    }
}

/// User summary embedded in the payment response
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "bookingHours")]
    pub booking_hours: Vec<BookingSlotDto>,
}

/// Payment receipt with user and charger summaries embedded
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDetailDto {
    pub id: String,
    #[serde(rename = "userId")]
    pub user: UserSummaryDto,
    #[serde(rename = "chargerId")]
    pub charger: ChargerDto,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "totalBookingHour")]
    pub total_booking_hours: i64,
    #[serde(rename = "totalPrice")]
    pub total_price: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Payment receipt with plain references
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "chargerId")]
    pub charger_id: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "totalBookingHour")]
    pub total_booking_hours: i64,
    #[serde(rename = "totalPrice")]
    pub total_price: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            charger_id: p.charger_id,
            start_time: p.range.start,
            end_time: p.range.end,
            total_booking_hours: p.total_booking_hours,
            total_price: p.total_price,
            created_at: p.created_at,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::StatusResponse;
    use crate::domain::BookingStatus;
    use chrono::{Duration, Utc};

    fn charger() -> Charger {
        let now = Utc::now();
        Charger {
            id: "charger-1".to_string(),
            name: "CP-001".to_string(),
            location: Some("Garage 2".to_string()),
            price_per_hour: Decimal::from(5),
            provider_id: "provider-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn paid_record(range: TimeRange) -> BookingRecord {
        BookingRecord {
            id: 1,
            user_id: "user-1".to_string(),
            charger_id: "charger-1".to_string(),
            range,
            status: BookingStatus::Paid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn payment_envelope_matches_the_wire_contract() {
        let start = Utc::now() + Duration::hours(2);
        let range = TimeRange::new(start, start + Duration::hours(2));
        let record = paid_record(range);

        let detail = PaymentDetailDto {
            id: "pay-1".to_string(),
            user: UserSummaryDto {
                id: "user-1".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                booking_hours: vec![BookingSlotDto::from(record)],
            },
            charger: ChargerDto::from(charger()),
            start_time: range.start,
            end_time: range.end,
            total_booking_hours: 2,
            total_price: Decimal::from(10),
            created_at: Utc::now(),
        };
        let envelope =
            StatusResponse::success("The charger booking has been paid successfully", detail);

        let v = serde_json::to_value(&envelope).unwrap();
        assert_eq!(v["status"], "Success");
        assert_eq!(
            v["detail"]["userId"]["bookingHours"][0]["status"],
            "paid"
        );
        assert_eq!(
            v["detail"]["userId"]["bookingHours"][0]["chargerId"],
            "charger-1"
        );
        assert_eq!(v["detail"]["chargerId"]["chargerName"], "CP-001");
        assert_eq!(v["detail"]["chargerId"]["pricePerHour"], "5");
        assert_eq!(v["detail"]["chargerId"]["companyId"], "provider-1");
        assert_eq!(v["detail"]["totalBookingHour"], 2);
        assert_eq!(v["detail"]["totalPrice"], "10");
        assert!(v["detail"]["startTime"].is_string());
        assert!(v["detail"]["endTime"].is_string());
    }

    #[test]
    fn charger_detail_flattens_charger_fields() {
        let start = Utc::now() + Duration::hours(2);
        let dto = ChargerDetailDto {
            charger: ChargerDto::from(charger()),
            unavailable_times: vec![TimeRange::new(start, start + Duration::hours(2))],
        };

        let v = serde_json::to_value(&dto).unwrap();
        // flattened: charger fields sit at the top level, next to the schedule
        assert_eq!(v["chargerName"], "CP-001");
        assert_eq!(v["companyId"], "provider-1");
        assert!(v["unavailableTimes"][0]["startTime"].is_string());
        assert!(v["unavailableTimes"][0]["endTime"].is_string());
        assert!(v.get("charger").is_none());
    }

    #[test]
    fn booking_detail_embeds_charger_under_charger_id() {
        let start = Utc::now() + Duration::hours(2);
        let range = TimeRange::new(start, start + Duration::hours(1));
        let mut record = paid_record(range);
        record.status = BookingStatus::Unpaid;

        let user = User::new("alice", "alice@example.com", crate::domain::UserRole::User);
        let detail = UserBookingDetailDto::new(user, vec![(record, Some(charger()))]);

        let v = serde_json::to_value(&detail).unwrap();
        assert_eq!(v["username"], "alice");
        assert_eq!(v["bookingHours"][0]["status"], "unpaid");
        assert_eq!(v["bookingHours"][0]["chargerId"]["chargerName"], "CP-001");
    }
}
