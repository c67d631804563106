use chloris_core::crops::CropDatabase;
use chloris_core::economics::{
    all_economics_profiles, energy_cost, facility_area, harvest_estimate, project_market,
    resolve_economics, FacilityConfig, HarvestEstimate, MarketUnit, YieldModel,
};

const TOLERANCE: f64 = 1e-9;

fn canopy() -> f64 {
    12.0 * 10.0 * 0.092903 * 0.8
}

#[test]
fn facility_area_converts_to_canopy() {
    let area = facility_area(12.0, 10.0);
    assert_eq!(area.area_ft2, 120.0);
    assert!((area.area_m2 - 11.14836).abs() < TOLERANCE);
    assert!((area.canopy_m2 - canopy()).abs() < TOLERANCE);
}

#[test]
fn profiles_resolve_by_name_and_family() {
    let db = CropDatabase::builtin().unwrap();
    let key = |id: &str| resolve_economics(db.by_id(id).unwrap()).key;

    assert_eq!(all_economics_profiles().len(), 8);
    assert_eq!(key("can-ind-001"), "Cannabis (Indica)");
    assert_eq!(key("can-sat-001"), "Cannabis (Sativa)");
    assert_eq!(key("can-rud-001"), "Cannabis (Autoflower)");
    assert_eq!(key("sol-tom-002"), "Tomato");
    assert_eq!(key("sol-pep-001"), "Pepper (Bell)");
    assert_eq!(key("leaf-let-001"), "Lettuce");
    // Onions and wheat have no family keyword and fall back to generic biomass.
    assert_eq!(key("root-oni-001"), "Generic");
    assert_eq!(key("grain-wheat-001"), "Generic");

    let mut renamed = db.by_id("can-ind-001").unwrap().clone();
    renamed.name = "Cannabis (Landrace)".to_string();
    assert_eq!(resolve_economics(&renamed).key, "Cannabis (Hybrid)");
}

#[test]
fn energy_uses_critical_day_length() {
    let db = CropDatabase::builtin().unwrap();

    let indica = energy_cost(db.by_id("can-ind-001").unwrap(), 1200.0, 0.14);
    assert_eq!(indica.system_watts, 1560.0);
    assert_eq!(indica.hours_per_day, 13.5);
    assert_eq!(indica.cycle_days, 79);
    assert!((indica.total_kwh - 1.56 * 13.5 * 79.0).abs() < TOLERANCE);
    assert!((indica.opex - 1.56 * 13.5 * 79.0 * 0.14).abs() < TOLERANCE);

    // A zero critical day length means "not photoperiodic": assume 12 h.
    let auto = energy_cost(db.by_id("can-rud-001").unwrap(), 1200.0, 0.14);
    assert_eq!(auto.hours_per_day, 12.0);

    let tomato = energy_cost(db.by_id("sol-tom-001").unwrap(), 1200.0, 0.14);
    assert_eq!(tomato.hours_per_day, 12.0);
    assert_eq!(tomato.cycle_days, 89);
}

#[test]
fn harvest_models() {
    let db = CropDatabase::builtin().unwrap();
    let canopy = canopy();

    let tomato = resolve_economics(db.by_id("sol-tom-001").unwrap());
    assert_eq!(tomato.model, YieldModel::Fruiting);
    assert_eq!(
        harvest_estimate(tomato, canopy),
        HarvestEstimate::Plants {
            count: 22,
            kilograms: 176.0
        }
    );

    let lettuce = resolve_economics(db.by_id("leaf-let-001").unwrap());
    assert_eq!(harvest_estimate(lettuce, canopy), HarvestEstimate::Heads(124));
    assert_eq!(HarvestEstimate::Heads(124).describe(), "124 heads");

    let indica = resolve_economics(db.by_id("can-ind-001").unwrap());
    match harvest_estimate(indica, canopy) {
        HarvestEstimate::Grams(grams) => assert!((grams - canopy * 550.0).abs() < TOLERANCE),
        other => panic!("expected biomass, got {other:?}"),
    }
}

#[test]
fn indica_projection() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();

    let projection = project_market(indica, &FacilityConfig::default());
    let grams = canopy() * 550.0;
    let gross = grams / 453.592 * 1800.0;
    let opex = 1.56 * 13.5 * 79.0 * 0.14;

    assert_eq!(projection.price, 1800.0);
    assert!((projection.gross_revenue - gross).abs() < 1e-6);
    assert!((projection.net_profit - (gross - opex)).abs() < 1e-6);
    assert!((projection.roi - (gross - opex) / opex * 100.0).abs() < 1e-6);
    assert!((projection.grams_per_watt.unwrap() - grams / 1200.0).abs() < TOLERANCE);
}

#[test]
fn market_units_drive_revenue() {
    let db = CropDatabase::builtin().unwrap();
    let facility = FacilityConfig::default();

    let tomato = project_market(db.by_id("sol-tom-001").unwrap(), &facility);
    assert_eq!(tomato.profile.market_unit, MarketUnit::Pound);
    assert!((tomato.gross_revenue - 176_000.0 / 453.592 * 2.5).abs() < 1e-6);
    assert!(tomato.grams_per_watt.is_none());

    let lettuce = project_market(db.by_id("leaf-let-001").unwrap(), &facility);
    assert!((lettuce.gross_revenue - 124.0 * 2.5).abs() < 1e-9);

    let onion = project_market(db.by_id("root-oni-001").unwrap(), &facility);
    assert_eq!(onion.profile.market_unit, MarketUnit::Kilogram);
    assert!((onion.gross_revenue - canopy() * 100.0 / 1000.0 * 5.0).abs() < 1e-9);
}

#[test]
fn price_override_and_free_energy() {
    let db = CropDatabase::builtin().unwrap();
    let lettuce = db.by_id("leaf-let-001").unwrap();

    let facility = FacilityConfig {
        energy_cost: 0.0,
        market_price: Some(4.0),
        ..FacilityConfig::default()
    };
    let projection = project_market(lettuce, &facility);
    assert_eq!(projection.price, 4.0);
    assert_eq!(projection.energy.opex, 0.0);
    assert_eq!(projection.roi, 0.0);
    assert!((projection.net_profit - 124.0 * 4.0).abs() < 1e-9);
}
