//! Local farm records: append-only stores kept on this machine, with
//! CSV export. No backend round-trip is involved.

use std::path::PathBuf;

use faranga_storage::{
    Append, Employee, FarmRecord, FertilizerApplication, ProductionRecord, RecordStore, SeedStock,
};

use crate::{fail, print_json, require_context, FarmCommands, FarmSection, OutputFormat};

pub(crate) fn dispatch(command: FarmCommands, output: OutputFormat, quiet: bool) {
    match command {
        FarmCommands::AddEmployee {
            full_name,
            role,
            start_date,
            pay_frequency,
            pay_amount,
            phone,
            national_id,
            employee_type,
            status,
            notes,
        } => add_record(
            Employee {
                id: 0,
                full_name,
                role,
                start_date,
                pay_frequency,
                pay_amount,
                phone,
                national_id,
                employee_type,
                status,
                notes,
            },
            "full name",
            output,
            quiet,
        ),

        FarmCommands::AddSeed {
            name,
            variety,
            quantity,
            unit,
            supplier,
            lot_number,
            purchase_date,
            storage_location,
            notes,
        } => add_record(
            SeedStock {
                id: 0,
                name,
                variety,
                quantity,
                unit,
                supplier,
                lot_number,
                purchase_date,
                storage_location,
                notes,
            },
            "name",
            output,
            quiet,
        ),

        FarmCommands::AddProduction {
            crop,
            season,
            area_hectares,
            planting_date,
            harvest_date,
            harvested_quantity,
            harvested_unit,
            field_name,
            buyer,
            price_per_unit,
            total_revenue,
            notes,
        } => add_record(
            ProductionRecord {
                id: 0,
                crop,
                season,
                area_hectares,
                planting_date,
                harvest_date,
                harvested_quantity,
                harvested_unit,
                field_name,
                buyer,
                price_per_unit,
                total_revenue,
                notes,
            },
            "crop",
            output,
            quiet,
        ),

        FarmCommands::AddFertilizer {
            fertilizer_name,
            crop,
            field_name,
            application_date,
            rate,
            interval_days,
            fertilizer_type,
            method,
            supplier,
            cost,
            notes,
        } => add_record(
            FertilizerApplication {
                id: 0,
                crop,
                field_name,
                fertilizer_name,
                application_date,
                rate,
                interval_days,
                fertilizer_type,
                method,
                supplier,
                cost,
                notes,
            },
            "fertilizer name",
            output,
            quiet,
        ),

        FarmCommands::List { section } => match section {
            FarmSection::Employees => list_records::<Employee>(output),
            FarmSection::Fertilizers => list_records::<FertilizerApplication>(output),
            FarmSection::Seeds => list_records::<SeedStock>(output),
            FarmSection::Production => list_records::<ProductionRecord>(output),
        },

        FarmCommands::Export { section, out } => match section {
            FarmSection::Employees => export_records::<Employee>(out, output, quiet),
            FarmSection::Fertilizers => export_records::<FertilizerApplication>(out, output, quiet),
            FarmSection::Seeds => export_records::<SeedStock>(out, output, quiet),
            FarmSection::Production => export_records::<ProductionRecord>(out, output, quiet),
        },
    }
}

fn add_record<R: FarmRecord>(record: R, key_label: &str, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    let mut store = RecordStore::<R>::load(ctx.store.clone());
    match store.append(record) {
        Append::Added { id, persisted } => {
            if !persisted {
                log::warn!("record kept for this session only; the storage write failed");
            }
            if !quiet {
                match output {
                    OutputFormat::Text => println!("Added record {id} ({} total).", store.len()),
                    OutputFormat::Json => print_json(&serde_json::json!({
                        "id": id,
                        "count": store.len(),
                        "persisted": persisted,
                    })),
                }
            }
        }
        Append::SkippedBlankKey => {
            fail(&format!("nothing added: {key_label} is required"), output)
        }
    }
}

fn list_records<R: FarmRecord>(output: OutputFormat) {
    let ctx = require_context(output);
    let store = RecordStore::<R>::load(ctx.store.clone());
    match output {
        OutputFormat::Text => {
            for record in store.records() {
                println!("{}  {}", record.id(), record.csv_row().join("  "));
            }
            println!("{} record(s)", store.len());
        }
        OutputFormat::Json => print_json(&store.records()),
    }
}

fn export_records<R: FarmRecord>(out: Option<PathBuf>, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    let store = RecordStore::<R>::load(ctx.store.clone());
    let csv = match store.export_csv() {
        Ok(csv) => csv,
        Err(e) => fail(&format!("could not build the CSV export: {e}"), output),
    };
    let path = out.unwrap_or_else(|| PathBuf::from("farm_data.csv"));
    if let Err(e) = std::fs::write(&path, csv) {
        fail(&format!("could not write '{}': {e}", path.display()), output);
    }
    if !quiet {
        match output {
            OutputFormat::Text => {
                println!("Saved {} ({} record(s)).", path.display(), store.len())
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "records": store.len(),
            })),
        }
    }
}
