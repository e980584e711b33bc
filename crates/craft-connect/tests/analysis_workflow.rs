//! Listing scenarios exercised through the public analyzer facade: eco-impact
//! bands, tagging of free text, price bands and validation of incomplete
//! product data.

use craft_connect::analysis::{
    AnalysisRequest, AnalysisSettings, AutoTagger, CraftAnalyzer, CraftText, EcoImpactError,
    EcoImpactEstimator, EcoProfileName, PriceCategory, PricingInputs, ProductDraft, Section,
    SustainabilityGrade,
};

fn textile_draft() -> ProductDraft {
    ProductDraft {
        category: Some("textiles".to_string()),
        weight_g: Some(250.0),
        packaging_weight_g: Some(60.0),
        distance_km_to_market: Some(280.0),
        percent_recycled_material: Some(35.0),
        production_method: Some("handmade".to_string()),
        ..ProductDraft::default()
    }
}

#[test]
fn handmade_textile_saves_co2_and_scores_mid_band() {
    for name in EcoProfileName::ordered() {
        let result = EcoImpactEstimator::new(name)
            .estimate_draft(&textile_draft())
            .expect("complete product estimates");

        assert!(result.co2_saving_kg > 0.0, "{name:?}");
        assert!(result.sustainability_score <= name.profile().score_cap);
    }

    let balanced = EcoImpactEstimator::default()
        .estimate_draft(&textile_draft())
        .expect("complete product estimates");
    assert!((40.0..=70.0).contains(&balanced.sustainability_score));
}

#[test]
fn bamboo_wind_chimes_are_tagged_sustainable() {
    let text = CraftText::new(
        "Handmade Bamboo Wind Chimes",
        "Beautiful wind chimes made from sustainable bamboo. Locally sourced and crafted by \
         village artisans.",
    );
    let tags = AutoTagger::new().tag(&text);

    assert!(tags.categories.is_empty());
    assert!(tags.sustainability_tags.contains("locally sourced"));
    assert!(tags.sustainability_tags.contains("handmade"));
    assert!(tags.eco_impact_score > 0.3);
    assert!(tags.eco_impact_score <= 1.0);
}

#[test]
fn price_categories_follow_breakpoints() {
    let tagger = AutoTagger::new();
    let priced = |price: Option<f64>| {
        let mut text = CraftText::new("Block printed cushion", "");
        text.price = price;
        tagger.tag(&text).price_category
    };

    assert_eq!(priced(Some(30.0)), PriceCategory::Affordable);
    assert_eq!(priced(Some(600.0)), PriceCategory::Luxury);
    assert_eq!(priced(None), PriceCategory::Unknown);
}

#[test]
fn incomplete_product_is_rejected_with_field_names() {
    let error = EcoImpactEstimator::default()
        .estimate_draft(&ProductDraft::default())
        .expect_err("empty product rejected");

    match error {
        EcoImpactError::Validation(validation) => {
            assert!(validation.missing_fields().contains(&"category"));
            assert!(validation.missing_fields().contains(&"production_method"));
            assert_eq!(validation.missing_fields().len(), 6);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn comprehensive_analysis_is_repeatable() {
    let request = AnalysisRequest {
        title: "Terracotta Planter".to_string(),
        product: ProductDraft {
            category: Some("terracotta".to_string()),
            weight_g: Some(1800.0),
            packaging_weight_g: Some(200.0),
            distance_km_to_market: Some(60.0),
            percent_recycled_material: Some(0.0),
            production_method: Some("small batch".to_string()),
            materials: vec!["clay".to_string()],
            description: "Hand thrown clay planter made with traditional methods, fired in a \
                          village kiln"
                .to_string(),
            price: Some(35.0),
        },
        location: Some("Bankura, West Bengal".to_string()),
        pricing: PricingInputs {
            base_material_price: Some(5.0),
            hours_of_labor: Some(2.0),
            ..PricingInputs::default()
        },
        ..AnalysisRequest::default()
    };

    let analyzer = CraftAnalyzer::new(&AnalysisSettings::default());
    let first = analyzer.analyze(&request);
    let second = analyzer.analyze(&request);

    assert_eq!(first, second);
    assert!(first.failed_sections().is_empty());
    assert!(matches!(first.insights, Section::Completed { .. }));
    let grade = first
        .sustainability
        .result()
        .map(|assessment| assessment.grade)
        .expect("sustainability completes");
    assert_ne!(grade, SustainabilityGrade::D);
}
