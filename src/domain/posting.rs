// src/domain/posting.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::pricing::{PricingFields, PricingMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Suv,
    Pickup,
    Van,
    Truck,
    Motorcycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Car,
        VehicleType::Suv,
        VehicleType::Pickup,
        VehicleType::Van,
        VehicleType::Truck,
        VehicleType::Motorcycle,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "car" => Some(VehicleType::Car),
            "suv" => Some(VehicleType::Suv),
            "pickup" => Some(VehicleType::Pickup),
            "van" => Some(VehicleType::Van),
            "truck" => Some(VehicleType::Truck),
            "motorcycle" => Some(VehicleType::Motorcycle),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Suv => "suv",
            VehicleType::Pickup => "pickup",
            VehicleType::Van => "van",
            VehicleType::Truck => "truck",
            VehicleType::Motorcycle => "motorcycle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Suv => "SUV",
            VehicleType::Pickup => "Pickup",
            VehicleType::Van => "Van",
            VehicleType::Truck => "Truck",
            VehicleType::Motorcycle => "Motorcycle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStep {
    Vehicle,
    Specs,
    Pricing,
    Photos,
    Review,
}

impl Default for PostStep {
    fn default() -> Self {
        PostStep::Vehicle
    }
}

impl PostStep {
    pub const ALL: [PostStep; 5] = [
        PostStep::Vehicle,
        PostStep::Specs,
        PostStep::Pricing,
        PostStep::Photos,
        PostStep::Review,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            PostStep::Vehicle => Some(PostStep::Specs),
            PostStep::Specs => Some(PostStep::Pricing),
            PostStep::Pricing => Some(PostStep::Photos),
            PostStep::Photos => Some(PostStep::Review),
            PostStep::Review => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            PostStep::Vehicle => None,
            PostStep::Specs => Some(PostStep::Vehicle),
            PostStep::Pricing => Some(PostStep::Specs),
            PostStep::Photos => Some(PostStep::Pricing),
            PostStep::Review => Some(PostStep::Photos),
        }
    }

    /// 1-based position for the step indicator.
    pub fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            PostStep::Vehicle => "Vehicle",
            PostStep::Specs => "Specs",
            PostStep::Pricing => "Pricing",
            PostStep::Photos => "Photos",
            PostStep::Review => "Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Optional,
    Hidden,
}

/// Spec-step fields whose visibility/requirement depends on the vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecField {
    Mileage,
    FuelType,
    Transmission,
    Color,
    Seats,
    EngineCc,
    PayloadKg,
}

impl SpecField {
    pub const ALL: [SpecField; 7] = [
        SpecField::Mileage,
        SpecField::FuelType,
        SpecField::Transmission,
        SpecField::Color,
        SpecField::Seats,
        SpecField::EngineCc,
        SpecField::PayloadKg,
    ];

    /// The form input name.
    pub fn name(self) -> &'static str {
        match self {
            SpecField::Mileage => "mileage_km",
            SpecField::FuelType => "fuel_type",
            SpecField::Transmission => "transmission",
            SpecField::Color => "color",
            SpecField::Seats => "seats",
            SpecField::EngineCc => "engine_cc",
            SpecField::PayloadKg => "payload_kg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecField::Mileage => "Mileage (km)",
            SpecField::FuelType => "Fuel type",
            SpecField::Transmission => "Transmission",
            SpecField::Color => "Color",
            SpecField::Seats => "Seats",
            SpecField::EngineCc => "Engine (cc)",
            SpecField::PayloadKg => "Payload (kg)",
        }
    }
}

/// The per-vehicle-type requirement table. This is the single source of
/// truth the form renderer and the validator both consume. There is no
/// per-type branching anywhere else.
pub fn field_rule(vehicle_type: VehicleType, field: SpecField) -> FieldRule {
    use FieldRule::*;
    use SpecField::*;
    use VehicleType::*;

    match (vehicle_type, field) {
        (_, Mileage) => Required,
        (_, Color) => Optional,

        (Motorcycle, FuelType) => Optional,
        (_, FuelType) => Required,

        (Motorcycle, Transmission) => Hidden,
        (Truck, Transmission) => Optional,
        (_, Transmission) => Required,

        (Van, Seats) => Required,
        (Car | Suv | Pickup, Seats) => Optional,
        (Truck | Motorcycle, Seats) => Hidden,

        (Motorcycle, EngineCc) => Required,
        (Truck, EngineCc) => Hidden,
        (_, EngineCc) => Optional,

        (Truck, PayloadKg) => Required,
        (Pickup, PayloadKg) => Optional,
        (_, PayloadKg) => Hidden,
    }
}

/// Fields the renderer shows for a type, table order.
pub fn visible_fields(vehicle_type: VehicleType) -> Vec<SpecField> {
    SpecField::ALL
        .into_iter()
        .filter(|f| field_rule(vehicle_type, *f) != FieldRule::Hidden)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The whole posting flow in one serializable value: current step plus every
/// collected answer. Persisted as JSON between requests so a seller can
/// leave and resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub step: PostStep,

    // Vehicle step
    pub vehicle_type: Option<VehicleType>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub location: Option<String>,

    // Specs step
    pub mileage_km: Option<i64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub seats: Option<i64>,
    pub engine_cc: Option<i64>,
    pub payload_kg: Option<i64>,
    pub description: Option<String>,

    // Pricing step
    pub pricing_type: Option<String>,
    pub price: Option<i64>,
    pub negotiable: bool,
    pub finance_type: Option<String>,
    pub finance_provider: Option<String>,
    pub original_amount: Option<i64>,
    pub outstanding_balance: Option<i64>,
    pub asking_price: Option<i64>,
    pub monthly_payment: Option<i64>,
    pub remaining_term_months: Option<i64>,
    pub early_settlement: bool,

    // Photos step
    pub photos: Vec<String>,
}

/// A fully validated draft, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListingInput {
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub location: String,
    pub mileage_km: Option<i64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub seats: Option<i64>,
    pub engine_cc: Option<i64>,
    pub payload_kg: Option<i64>,
    pub description: Option<String>,
    pub pricing: PricingFields,
    pub photos: Vec<String>,
}

impl NewListingInput {
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

impl PostDraft {
    /// Apply one step's submitted form fields. Only the submitted step's
    /// inputs are touched, so resubmitting the pricing form cannot clobber
    /// the specs. Unparseable numbers become `None` and surface as missing
    /// at validation.
    pub fn apply_step_form(&mut self, step: PostStep, form: &HashMap<String, String>) {
        match step {
            PostStep::Vehicle => {
                let previous = self.vehicle_type;
                self.vehicle_type = form
                    .get("vehicle_type")
                    .and_then(|v| VehicleType::parse(v));
                self.make = text(form, "make");
                self.model = text(form, "model");
                self.year = number(form, "year");
                self.location = text(form, "location");

                if self.vehicle_type != previous {
                    self.clear_hidden_specs();
                }
            }
            PostStep::Specs => {
                self.mileage_km = number(form, "mileage_km");
                self.fuel_type = text(form, "fuel_type");
                self.transmission = text(form, "transmission");
                self.color = text(form, "color");
                self.seats = number(form, "seats");
                self.engine_cc = number(form, "engine_cc");
                self.payload_kg = number(form, "payload_kg");
                self.description = text(form, "description");
                self.clear_hidden_specs();
            }
            PostStep::Pricing => {
                self.pricing_type = text(form, "pricing_type");
                self.price = number(form, "price");
                self.negotiable = checkbox(form, "negotiable");
                self.finance_type = text(form, "finance_type");
                self.finance_provider = text(form, "finance_provider");
                self.original_amount = number(form, "original_amount");
                self.outstanding_balance = number(form, "outstanding_balance");
                self.asking_price = number(form, "asking_price");
                self.monthly_payment = number(form, "monthly_payment");
                self.remaining_term_months = number(form, "remaining_term_months");
                self.early_settlement = checkbox(form, "early_settlement");
            }
            PostStep::Photos => {
                self.photos = form
                    .get("photo_urls")
                    .map(|raw| {
                        raw.lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default();
            }
            PostStep::Review => {}
        }
    }

    /// Drop values for spec fields the current vehicle type hides, so a
    /// draft that switched from truck to car does not publish a payload.
    fn clear_hidden_specs(&mut self) {
        let Some(vt) = self.vehicle_type else { return };
        for field in SpecField::ALL {
            if field_rule(vt, field) != FieldRule::Hidden {
                continue;
            }
            match field {
                SpecField::Mileage => self.mileage_km = None,
                SpecField::FuelType => self.fuel_type = None,
                SpecField::Transmission => self.transmission = None,
                SpecField::Color => self.color = None,
                SpecField::Seats => self.seats = None,
                SpecField::EngineCc => self.engine_cc = None,
                SpecField::PayloadKg => self.payload_kg = None,
            }
        }
    }

    pub fn validate_step(&self, step: PostStep) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match step {
            PostStep::Vehicle => {
                if self.vehicle_type.is_none() {
                    errors.push(FieldError::new("vehicle_type", "choose a vehicle type"));
                }
                if is_blank(&self.make) {
                    errors.push(FieldError::new("make", "make is required"));
                }
                if is_blank(&self.model) {
                    errors.push(FieldError::new("model", "model is required"));
                }
                match self.year {
                    Some(y) if (1950..=2100).contains(&y) => {}
                    _ => errors.push(FieldError::new("year", "enter a valid year")),
                }
                if is_blank(&self.location) {
                    errors.push(FieldError::new("location", "location is required"));
                }
            }
            PostStep::Specs => {
                let Some(vt) = self.vehicle_type else {
                    errors.push(FieldError::new("vehicle_type", "choose a vehicle type first"));
                    return errors;
                };
                for field in SpecField::ALL {
                    if field_rule(vt, field) != FieldRule::Required {
                        continue;
                    }
                    let missing = match field {
                        SpecField::Mileage => self.mileage_km.is_none(),
                        SpecField::FuelType => is_blank(&self.fuel_type),
                        SpecField::Transmission => is_blank(&self.transmission),
                        SpecField::Color => is_blank(&self.color),
                        SpecField::Seats => self.seats.is_none(),
                        SpecField::EngineCc => self.engine_cc.is_none(),
                        SpecField::PayloadKg => self.payload_kg.is_none(),
                    };
                    if missing {
                        errors.push(FieldError::new(field.name(), "this field is required"));
                    }
                }
                if matches!(self.mileage_km, Some(m) if m < 0) {
                    errors.push(FieldError::new("mileage_km", "mileage cannot be negative"));
                }
            }
            PostStep::Pricing => match PricingMode::parse(self.pricing_type.as_deref()) {
                PricingMode::Cash => match self.price {
                    Some(p) if p > 0 => {}
                    _ => errors.push(FieldError::new("price", "enter an asking price")),
                },
                PricingMode::Finance => {
                    match self.outstanding_balance {
                        Some(b) if b > 0 => {}
                        _ => errors.push(FieldError::new(
                            "outstanding_balance",
                            "enter the outstanding balance",
                        )),
                    }
                    if matches!(self.asking_price, Some(a) if a <= 0) {
                        errors.push(FieldError::new("asking_price", "enter a valid asking price"));
                    }
                }
            },
            PostStep::Photos => {
                for photo in &self.photos {
                    if url::Url::parse(photo).is_err() {
                        errors.push(FieldError::new("photo_urls", "each photo must be a valid URL"));
                        break;
                    }
                }
            }
            PostStep::Review => {
                for earlier in [
                    PostStep::Vehicle,
                    PostStep::Specs,
                    PostStep::Pricing,
                    PostStep::Photos,
                ] {
                    errors.extend(self.validate_step(earlier));
                }
            }
        }
        errors
    }

    /// Validate everything and produce the insertable record. The stored
    /// `price` column is the denormalized sort key: for finance listings it
    /// mirrors the buyer-facing amount.
    pub fn validate_for_publish(&self) -> Result<NewListingInput, Vec<FieldError>> {
        let errors = self.validate_step(PostStep::Review);
        if !errors.is_empty() {
            return Err(errors);
        }

        let pricing_type = self.pricing_type.clone();
        let mode = PricingMode::parse(pricing_type.as_deref());
        let price = match mode {
            PricingMode::Cash => self.price.unwrap_or(0),
            PricingMode::Finance => self
                .asking_price
                .or(self.outstanding_balance)
                .unwrap_or(0),
        };

        Ok(NewListingInput {
            vehicle_type: self.vehicle_type.expect("validated"),
            make: self.make.clone().expect("validated"),
            model: self.model.clone().expect("validated"),
            year: self.year.expect("validated"),
            location: self.location.clone().expect("validated"),
            mileage_km: self.mileage_km,
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            color: self.color.clone(),
            seats: self.seats,
            engine_cc: self.engine_cc,
            payload_kg: self.payload_kg,
            description: self.description.clone(),
            pricing: PricingFields {
                pricing_type,
                price,
                negotiable: self.negotiable,
                finance_type: self.finance_type.clone(),
                finance_provider: self.finance_provider.clone(),
                original_amount: self.original_amount,
                outstanding_balance: self.outstanding_balance,
                asking_price: self.asking_price,
                monthly_payment: self.monthly_payment,
                remaining_term_months: self.remaining_term_months,
                early_settlement: self.early_settlement,
            },
            photos: self.photos.clone(),
        })
    }

    /// Validate the current step; on success move forward and report the new
    /// step, otherwise stay put and report the errors.
    pub fn advance(&mut self) -> Result<PostStep, Vec<FieldError>> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Going back never validates; half-filled steps stay as they are.
    pub fn step_back(&mut self) -> PostStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }
}

fn text(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn number(form: &HashMap<String, String>, key: &str) -> Option<i64> {
    form.get(key).and_then(|v| v.trim().parse().ok())
}

fn checkbox(form: &HashMap<String, String>, key: &str) -> bool {
    matches!(form.get(key).map(String::as_str), Some("on") | Some("true") | Some("1"))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}
