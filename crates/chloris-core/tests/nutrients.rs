use chloris_core::crops::{CropDatabase, NutrientRequirements, TargetRange};
use chloris_core::nutrients::{
    all_elements, antagonisms, charge_equivalent, ec_status, estimated_ec, evaluate_reservoir,
    ionic_balance, suitability_score, EcStatus, Element, NutrientMix, Severity,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn element_table_is_in_declaration_order() {
    let elements = all_elements();
    assert_eq!(elements.len(), 7);
    for (element, props) in Element::ALL.iter().zip(elements) {
        assert_eq!(*element, props.element);
    }
    assert_eq!(Element::Ca.properties().charge, 2);
    assert!(!Element::S.is_cation());
}

#[test]
fn ec_uses_the_500_scale() {
    let mix = NutrientMix::default();
    assert_eq!(mix.total_ppm(), 602.0);
    assert!(close(estimated_ec(&mix, 0.2), 1.404));
    assert!(close(estimated_ec(&mix, 0.0), 1.204));
}

#[test]
fn charge_equivalent_weights_by_valence() {
    assert!(close(charge_equivalent(Element::K, 39.10), 1.0));
    assert!(close(charge_equivalent(Element::Ca, 40.08), 2.0));
    assert!(close(charge_equivalent(Element::P, 30.97), 3.0));
}

#[test]
fn ionic_balance_is_invariant_under_scaling() {
    let mix = NutrientMix::default();
    let base = ionic_balance(&mix);
    assert!(base.cations > 0.0 && base.anions > 0.0);

    for factor in [0.1, 0.5, 2.5, 10.0, 1234.0] {
        let scaled = ionic_balance(&mix.scaled(factor));
        assert!(close(scaled.ratio, base.ratio), "factor {factor}");
        assert!(close(scaled.cations, base.cations * factor));
    }
}

#[test]
fn zero_anion_load_divides_by_one() {
    let mix = NutrientMix {
        n: 0.0,
        p: 0.0,
        k: 39.10,
        ca: 0.0,
        mg: 0.0,
        s: 0.0,
        fe: 0.0,
    };
    let balance = ionic_balance(&mix);
    assert_eq!(balance.anions, 0.0);
    assert!(close(balance.ratio, balance.cations));
}

#[test]
fn default_mix_flags_potassium_against_magnesium() {
    let mix = NutrientMix::default();
    let issues = antagonisms(&mix, estimated_ec(&mix, 0.2), None);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::High);
    assert!(issues[0].message.contains("Potassium"));
}

#[test]
fn gypsum_and_iron_lockouts() {
    let mix = NutrientMix {
        n: 150.0,
        p: 80.0,
        k: 100.0,
        ca: 200.0,
        mg: 60.0,
        s: 120.0,
        fe: 1.0,
    };
    let issues = antagonisms(&mix, 2.0, None);
    let kinds: Vec<&str> = issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(kinds, vec!["Lockout", "Precip"]);
    assert_eq!(issues[1].severity, Severity::Critical);
}

#[test]
fn crop_targets_add_osmotic_and_calcium_warnings() {
    let db = CropDatabase::builtin().unwrap();
    let lettuce = db.by_id("leaf-let-001").unwrap();

    let mix = NutrientMix {
        ca: 50.0,
        ..NutrientMix::default()
    };
    let issues = antagonisms(&mix, 1.8, Some(lettuce));
    let osmotic = issues.iter().find(|issue| issue.kind == "Osmotic").unwrap();
    assert_eq!(osmotic.severity, Severity::Critical);
    assert!(osmotic.message.contains("Lettuce"));
    assert!(issues.iter().any(|issue| issue.kind == "Deficiency"));
}

#[test]
fn suitability_penalises_each_miss() {
    let db = CropDatabase::builtin().unwrap();
    let mix = NutrientMix::default();
    let ec = estimated_ec(&mix, 0.2);

    let indica = db.by_id("can-ind-001").unwrap();
    assert_eq!(suitability_score(&mix, ec, indica), 90);

    let tomato = db.by_id("sol-tom-001").unwrap();
    assert_eq!(suitability_score(&mix, ec, tomato), 70);

    let wheat = db.by_id("grain-wheat-001").unwrap();
    assert!(wheat.nutrient_targets.is_none());
    assert_eq!(suitability_score(&mix, ec, wheat), 100);
}

#[test]
fn suitability_floors_at_zero() {
    let db = CropDatabase::builtin().unwrap();
    let mut crop = db.by_id("sol-tom-001").unwrap().clone();
    let impossible = TargetRange::new(1000.0, 0.0);
    crop.nutrient_targets = Some(NutrientRequirements {
        n: impossible,
        p: impossible,
        k: impossible,
        ca: impossible,
        mg: impossible,
        s: impossible,
        fe: impossible,
        ec: TargetRange::new(0.5, 1.0),
        ph: TargetRange::new(5.5, 6.5),
    });

    let mix = NutrientMix::default();
    assert_eq!(suitability_score(&mix, 3.0, &crop), 0);
}

#[test]
fn reservoir_report_combines_checks() {
    let db = CropDatabase::builtin().unwrap();
    let tomato = db.by_id("sol-tom-001").unwrap();

    let report = evaluate_reservoir(&NutrientMix::default(), 0.2, Some(tomato));
    assert!(close(report.estimated_ec, 1.404));
    assert_eq!(report.suitability, 70);
    assert_eq!(report.ec_status, Some(EcStatus::TooLow));

    let targets = tomato.nutrient_targets.as_ref().unwrap();
    assert_eq!(ec_status(4.0, targets), EcStatus::TooHot);
    assert_eq!(ec_status(2.5, targets), EcStatus::Optimal);

    let unscored = evaluate_reservoir(&NutrientMix::default(), 0.2, None);
    assert_eq!(unscored.suitability, 100);
    assert!(unscored.ec_status.is_none());
}
