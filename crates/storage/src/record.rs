use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A farm record persisted by the local record store.
///
/// Four variants exist (employees, seed stock, production, fertilizer);
/// each names its storage key, its CSV layout, and the single field
/// whose blank-ness rejects an append. Fields are free-form strings as
/// entered on the dashboard forms; only the key field is validated.
pub trait FarmRecord: Serialize + DeserializeOwned + Clone + Send {
    /// Durable-storage key holding the JSON-serialized list.
    const STORAGE_KEY: &'static str;
    /// Label written in the CSV `Section` column.
    const SECTION: &'static str;
    /// CSV column headers, including the leading `Section`.
    const CSV_HEADER: &'static [&'static str];

    /// The field that must be non-blank for an append to be accepted.
    fn key_field(&self) -> &str;
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    /// Values for one CSV row, aligned with `CSV_HEADER` after `Section`.
    fn csv_row(&self) -> Vec<String>;
}

/// A farm employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub role: String,
    pub start_date: String,
    pub pay_frequency: String,
    pub pay_amount: String,
    pub phone: String,
    pub national_id: String,
    pub employee_type: String,
    pub status: String,
    pub notes: String,
}

impl FarmRecord for Employee {
    const STORAGE_KEY: &'static str = "farm-employees";
    const SECTION: &'static str = "Employee";
    const CSV_HEADER: &'static [&'static str] = &[
        "Section",
        "Name",
        "Role",
        "Start date",
        "Pay frequency",
        "Pay amount (RWF)",
    ];

    fn key_field(&self) -> &str {
        &self.full_name
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.role.clone(),
            self.start_date.clone(),
            self.pay_frequency.clone(),
            self.pay_amount.clone(),
        ]
    }
}

/// Seed stock on hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedStock {
    pub id: i64,
    pub name: String,
    pub variety: String,
    pub quantity: String,
    pub unit: String,
    pub supplier: String,
    pub lot_number: String,
    pub purchase_date: String,
    pub storage_location: String,
    pub notes: String,
}

impl FarmRecord for SeedStock {
    const STORAGE_KEY: &'static str = "farm-seed-stock";
    const SECTION: &'static str = "SeedStock";
    const CSV_HEADER: &'static [&'static str] =
        &["Section", "Name", "Variety", "Quantity", "Unit"];

    fn key_field(&self) -> &str {
        &self.name
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.variety.clone(),
            self.quantity.clone(),
            self.unit.clone(),
        ]
    }
}

/// One planting/harvest cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionRecord {
    pub id: i64,
    pub crop: String,
    pub season: String,
    pub area_hectares: String,
    pub planting_date: String,
    pub harvest_date: String,
    pub harvested_quantity: String,
    pub harvested_unit: String,
    pub field_name: String,
    pub buyer: String,
    pub price_per_unit: String,
    pub total_revenue: String,
    pub notes: String,
}

impl FarmRecord for ProductionRecord {
    const STORAGE_KEY: &'static str = "farm-production-records";
    const SECTION: &'static str = "Production";
    const CSV_HEADER: &'static [&'static str] = &[
        "Section",
        "Crop",
        "Season",
        "Area (ha)",
        "Planting date",
        "Harvest date",
        "Harvested qty",
        "Unit",
    ];

    fn key_field(&self) -> &str {
        &self.crop
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.crop.clone(),
            self.season.clone(),
            self.area_hectares.clone(),
            self.planting_date.clone(),
            self.harvest_date.clone(),
            self.harvested_quantity.clone(),
            self.harvested_unit.clone(),
        ]
    }
}

/// One fertilizer application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FertilizerApplication {
    pub id: i64,
    pub crop: String,
    pub field_name: String,
    pub fertilizer_name: String,
    pub application_date: String,
    pub rate: String,
    pub interval_days: String,
    pub fertilizer_type: String,
    pub method: String,
    pub supplier: String,
    pub cost: String,
    pub notes: String,
}

impl FarmRecord for FertilizerApplication {
    const STORAGE_KEY: &'static str = "farm-fertilizer-records";
    const SECTION: &'static str = "Fertilizer";
    const CSV_HEADER: &'static [&'static str] = &[
        "Section",
        "Crop/field",
        "Fertilizer",
        "Date applied",
        "Rate",
        "Interval (days)",
    ];

    fn key_field(&self) -> &str {
        &self.fertilizer_name
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.crop.clone(),
            self.fertilizer_name.clone(),
            self.application_date.clone(),
            self.rate.clone(),
            self.interval_days.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_align_with_rows() {
        let employee = Employee::default();
        assert_eq!(Employee::CSV_HEADER.len(), employee.csv_row().len() + 1);
        let seed = SeedStock::default();
        assert_eq!(SeedStock::CSV_HEADER.len(), seed.csv_row().len() + 1);
        let production = ProductionRecord::default();
        assert_eq!(
            ProductionRecord::CSV_HEADER.len(),
            production.csv_row().len() + 1
        );
        let fertilizer = FertilizerApplication::default();
        assert_eq!(
            FertilizerApplication::CSV_HEADER.len(),
            fertilizer.csv_row().len() + 1
        );
    }

    #[test]
    fn records_tolerate_missing_fields_in_stored_data() {
        // Lists written by earlier versions may lack newer fields.
        let employee: Employee =
            serde_json::from_str(r#"{"id": 1, "full_name": "Jean"}"#).unwrap();
        assert_eq!(employee.full_name, "Jean");
        assert!(employee.pay_frequency.is_empty());
    }
}
