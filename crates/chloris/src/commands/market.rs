use anyhow::Result;
use chloris_core::economics::{all_economics_profiles, project_market};
use clap::Args;

use super::{new_table, select_crop};
use crate::App;

#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Crop id (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,
    /// Room length, ft
    #[arg(long)]
    pub length: Option<f64>,
    /// Room width, ft
    #[arg(long)]
    pub width: Option<f64>,
    /// Lighting load, W
    #[arg(long)]
    pub watts: Option<f64>,
    /// Electricity price, $/kWh
    #[arg(long)]
    pub energy_cost: Option<f64>,
    /// Sale price per market unit, replacing the profile default
    #[arg(long)]
    pub price: Option<f64>,
    /// List the market profiles instead of projecting
    #[arg(long)]
    pub profiles: bool,
}

pub fn handle(args: MarketArgs, app: &App) -> Result<()> {
    if args.profiles {
        let mut table = new_table(vec!["Profile", "Model", "Base yield", "Density", "Unit", "Price"]);
        for profile in all_economics_profiles() {
            table.add_row(vec![
                profile.key.to_string(),
                profile.model.as_str().to_string(),
                profile.base_yield.to_string(),
                profile.density.map_or("-".to_string(), |density| density.to_string()),
                profile.market_unit.as_str().to_string(),
                format!("${:.2}", profile.default_price),
            ]);
        }
        println!("{table}");
        return Ok(());
    }

    let crop = select_crop(app, args.crop.as_deref())?;
    let mut facility = app.settings.facility_config();
    if let Some(length) = args.length {
        facility.length_ft = length;
    }
    if let Some(width) = args.width {
        facility.width_ft = width;
    }
    if let Some(watts) = args.watts {
        facility.lighting_watts = watts;
    }
    if let Some(cost) = args.energy_cost {
        facility.energy_cost = cost;
    }
    if args.price.is_some() {
        facility.market_price = args.price;
    }

    let projection = project_market(crop, &facility);
    let area = projection.area;
    let energy = projection.energy;

    println!("{} (market profile: {})", crop.display_name(), projection.profile.key);
    println!(
        "  facility: {:.0} ft² ({:.2} m², canopy {:.2} m²)",
        area.area_ft2, area.area_m2, area.canopy_m2
    );
    println!(
        "  energy: {:.0} W system x {} h/day x {} days = {:.1} kWh, ${:.2}",
        energy.system_watts, energy.hours_per_day, energy.cycle_days, energy.total_kwh, energy.opex
    );
    println!(
        "  harvest: {} at ${:.2}/{}",
        projection.harvest.describe(),
        projection.price,
        projection.profile.market_unit.as_str()
    );
    println!("  gross revenue: ${:.2}", projection.gross_revenue);
    println!("  net profit: ${:.2}", projection.net_profit);
    println!("  ROI: {:.1}%", projection.roi);
    if let Some(grams_per_watt) = projection.grams_per_watt {
        println!("  efficiency: {grams_per_watt:.2} g/W");
    }

    Ok(())
}
