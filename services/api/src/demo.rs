use clap::Args;
use craft_connect::analysis::{
    AnalysisRequest, AnalysisSettings, CraftAnalyzer, EcoProfileName, PricingInputs,
    ProductDraft, Section, TextAnalysisMode,
};
use craft_connect::config::AppConfig;
use craft_connect::error::AppError;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// JSON analysis request to read. Reads stdin when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Eco scoring profile (balanced-v2 or classic-v1). Defaults to configuration.
    #[arg(long, value_parser = parse_profile)]
    pub(crate) eco_profile: Option<EcoProfileName>,
    /// Skip the enhanced text insights.
    #[arg(long)]
    pub(crate) basic: bool,
}

fn parse_profile(raw: &str) -> Result<EcoProfileName, String> {
    EcoProfileName::parse(raw).ok_or_else(|| {
        format!("unknown eco profile '{raw}' (expected balanced-v2 or classic-v1)")
    })
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs { input, pretty } = args;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let request: AnalysisRequest = serde_json::from_str(&raw)?;

    let settings = AppConfig::load()?.analysis;
    let result = CraftAnalyzer::new(&settings).analyze(&request);

    let rendered = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut settings = AppConfig::load()?.analysis;
    if let Some(profile) = args.eco_profile {
        settings.eco_profile = profile;
    }
    if args.basic {
        settings.text_analysis = TextAnalysisMode::Basic;
    }

    render_demo(&settings, &sample_listings());
    Ok(())
}

fn render_demo(settings: &AnalysisSettings, listings: &[AnalysisRequest]) {
    let analyzer = CraftAnalyzer::new(settings);

    println!("CraftConnect analysis demo");
    println!(
        "Eco profile {} | text analysis {}",
        settings.eco_profile.label(),
        settings.text_analysis.label()
    );

    for request in listings {
        let result = analyzer.analyze(request);
        println!("\n{}", request.title);

        match &result.eco_impact {
            Section::Completed { result } => println!(
                "- Eco impact: {:.1}% score | {:.2} kg CO2 saved vs factory",
                result.sustainability_score, result.co2_saving_kg
            ),
            Section::Failed { error } => println!("- Eco impact unavailable: {error}"),
            Section::Skipped { reason } => println!("- Eco impact skipped: {reason}"),
        }

        if let Some(assessment) = result.sustainability.result() {
            println!(
                "- Sustainability grade {} (index {:.2}){}",
                assessment.grade.label(),
                assessment.overall_sustainability_index,
                if assessment.certification_eligible {
                    " | certification eligible"
                } else {
                    ""
                }
            );
            for advice in assessment.recommendations.iter().take(2) {
                println!("    * {advice}");
            }
        }

        if let Some(tags) = result.tags.result() {
            let categories = if tags.categories.is_empty() {
                "uncategorized".to_string()
            } else {
                tags.categories.join(", ")
            };
            println!(
                "- Tags: {categories} | {} price band | eco tag score {:.2}",
                tags.price_category.label(),
                tags.eco_impact_score
            );
        }

        if let Some(estimate) = result.pricing.result() {
            println!(
                "- Suggested price {:.2} ({:.2} - {:.2}, confidence {:.2})",
                estimate.predicted_price,
                estimate.price_range.min,
                estimate.price_range.max,
                estimate.confidence
            );
        }

        if let Some(insights) = result.insights.result() {
            if let Some(region) = insights.heritage.regional.primary_region {
                println!("- Regional heritage: {region}");
            }
            for suggestion in insights.marketing_suggestions.iter().take(2) {
                println!("    * {suggestion}");
            }
        }
    }
}

fn sample_listings() -> Vec<AnalysisRequest> {
    vec![
        AnalysisRequest {
            title: "Organic Cotton Block Print Stole".to_string(),
            product: ProductDraft {
                category: Some("textiles".to_string()),
                weight_g: Some(300.0),
                packaging_weight_g: Some(40.0),
                distance_km_to_market: Some(120.0),
                percent_recycled_material: Some(20.0),
                production_method: Some("handmade".to_string()),
                materials: vec!["organic cotton".to_string()],
                description: "Hand block printed stole woven with traditional methods. \
                    Fair trade and locally sourced."
                    .to_string(),
                price: Some(45.0),
            },
            location: Some("Jaipur, Rajasthan".to_string()),
            artisan: Some("Meera".to_string()),
            pricing: PricingInputs {
                base_material_price: Some(12.0),
                hours_of_labor: Some(6.0),
                ..PricingInputs::default()
            },
            image: None,
        },
        AnalysisRequest {
            title: "Madhubani Painting on Handmade Paper".to_string(),
            product: ProductDraft {
                category: Some("painting".to_string()),
                weight_g: Some(150.0),
                packaging_weight_g: Some(80.0),
                distance_km_to_market: Some(900.0),
                percent_recycled_material: Some(60.0),
                production_method: Some("handmade".to_string()),
                materials: vec!["paper".to_string()],
                description: "Traditional madhubani painting by a village artisan, \
                    a thoughtful Diwali gift"
                    .to_string(),
                price: Some(2400.0),
            },
            location: Some("Darbhanga, Bihar".to_string()),
            artisan: None,
            pricing: PricingInputs::default(),
            image: None,
        },
        AnalysisRequest {
            title: "Acrylic Throw".to_string(),
            product: ProductDraft {
                category: Some("textiles".to_string()),
                weight_g: Some(2000.0),
                materials: vec!["acrylic".to_string()],
                description: "Mass production acrylic throw".to_string(),
                price: Some(30.0),
                ..ProductDraft::default()
            },
            location: Some("Shenzhen".to_string()),
            artisan: None,
            pricing: PricingInputs::default(),
            image: None,
        },
    ]
}
