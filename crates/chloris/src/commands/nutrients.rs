use anyhow::Result;
use chloris_core::nutrients::{charge_equivalent, element_target, evaluate_reservoir, Element};
use clap::Args;

use super::{new_table, select_crop};
use crate::App;

#[derive(Args, Debug)]
pub struct NutrientsArgs {
    /// Crop id (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,
    /// Override one element, e.g. --set K=220 (repeatable)
    #[arg(long = "set", value_parser = parse_assignment)]
    pub assignments: Vec<(Element, f64)>,
    /// Multiply every concentration, e.g. 0.5 for half strength
    #[arg(long, default_value_t = 1.0)]
    pub strength: f64,
    /// EC of the source water
    #[arg(long)]
    pub base_ec: Option<f64>,
}

fn parse_assignment(raw: &str) -> Result<(Element, f64), String> {
    let (symbol, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ELEMENT=PPM, got '{raw}'"))?;
    let element = Element::ALL
        .into_iter()
        .find(|element| element.symbol().eq_ignore_ascii_case(symbol.trim()))
        .ok_or_else(|| format!("unknown element '{symbol}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if value < 0.0 {
        return Err(format!("{element} cannot be negative"));
    }
    Ok((element, value))
}

pub fn handle(args: NutrientsArgs, app: &App) -> Result<()> {
    let crop = select_crop(app, args.crop.as_deref())?;
    let settings = &app.settings.nutrients;

    let mut mix = settings.mix;
    for (element, value) in &args.assignments {
        mix.set_ppm(*element, *value);
    }
    let mix = mix.scaled(args.strength);
    let base_ec = args.base_ec.unwrap_or(settings.base_ec);

    let report = evaluate_reservoir(&mix, base_ec, Some(crop));
    let targets = crop.nutrient_targets.as_ref();

    let mut table = new_table(vec!["Element", "Name", "ppm", "Target", "meq/L"]);
    for element in Element::ALL {
        let props = element.properties();
        let ppm = mix.ppm(element);
        let target = targets
            .map(|targets| element_target(targets, element))
            .map_or("-".to_string(), |range| format!("{}-{}", range.min, range.max));
        table.add_row(vec![
            element.to_string(),
            props.name.to_string(),
            format!("{ppm:.1}"),
            target,
            format!("{:.2}", charge_equivalent(element, ppm)),
        ]);
    }
    println!("{table}");

    println!(
        "{} gal tank, target pH {}",
        settings.tank_gallons, settings.target_ph
    );
    match (report.ec_status, targets) {
        (Some(status), Some(targets)) => println!(
            "Estimated EC: {:.2} mS/cm ({}; {} wants {}-{})",
            report.estimated_ec,
            status.label(),
            crop.name,
            targets.ec.min,
            targets.ec.max
        ),
        _ => println!("Estimated EC: {:.2} mS/cm", report.estimated_ec),
    }
    println!(
        "Ionic balance: {:.2} cation / {:.2} anion meq (ratio {:.2})",
        report.balance.cations, report.balance.anions, report.balance.ratio
    );
    println!("Suitability for {}: {}/100", crop.name, report.suitability);

    if report.antagonisms.is_empty() {
        println!("No antagonisms detected.");
    } else {
        let mut issues = new_table(vec!["Severity", "Kind", "Issue"]);
        for issue in &report.antagonisms {
            issues.add_row(vec![
                issue.severity.as_str().to_string(),
                issue.kind.to_string(),
                issue.message.clone(),
            ]);
        }
        println!("{issues}");
    }

    Ok(())
}
