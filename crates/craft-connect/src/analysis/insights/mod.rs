//! Optional text insights layered on top of tagging. The capability is chosen
//! once at startup; `basic` produces no insights section.

mod heritage;
mod market;

pub use heritage::{
    FestivalRelevance, HeritageAnalysis, HeritageLevel, RegionalAnalysis, TechniqueAnalysis,
    TraditionalSustainability, TraditionalSustainabilityLevel,
};
pub use market::{
    AudienceAnalysis, ListingPriceGuidance, MarketAnalysis, PriceDemographic, PriceFactors,
    SeasonalAnalysis, SentimentAnalysis,
};

use serde::{Deserialize, Serialize};

use super::domain::CraftText;
use super::tagging::TaggingResult;
use market::SuggestionInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnalysisMode {
    Basic,
    #[default]
    Enhanced,
}

impl TextAnalysisMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enhanced => "enhanced",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "enhanced" => Some(Self::Enhanced),
            _ => None,
        }
    }
}

/// Marketing and heritage insights for one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInsights {
    pub sentiment: SentimentAnalysis,
    pub seasonal: SeasonalAnalysis,
    pub market: MarketAnalysis,
    pub uniqueness_score: f64,
    pub listing_price_guidance: ListingPriceGuidance,
    pub audience: AudienceAnalysis,
    pub marketing_suggestions: Vec<String>,
    pub heritage: HeritageAnalysis,
}

/// Text-analysis capability. Implementations must be deterministic.
pub trait TextAnalyzer: Send + Sync {
    fn mode(&self) -> TextAnalysisMode;

    /// `None` means the capability does not produce insights.
    fn insights(&self, item: &CraftText, tags: Option<&TaggingResult>) -> Option<TextInsights>;
}

#[derive(Debug, Clone, Default)]
pub struct BasicTextAnalyzer;

impl TextAnalyzer for BasicTextAnalyzer {
    fn mode(&self) -> TextAnalysisMode {
        TextAnalysisMode::Basic
    }

    fn insights(&self, _item: &CraftText, _tags: Option<&TaggingResult>) -> Option<TextInsights> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnhancedTextAnalyzer;

impl TextAnalyzer for EnhancedTextAnalyzer {
    fn mode(&self) -> TextAnalysisMode {
        TextAnalysisMode::Enhanced
    }

    fn insights(&self, item: &CraftText, tags: Option<&TaggingResult>) -> Option<TextInsights> {
        let corpus = item.corpus();

        let sentiment = market::sentiment(&item.description);
        let seasonal = market::seasonal(&corpus);
        let market_analysis = market::market_potential(&corpus, item.price);
        let uniqueness_score = market::uniqueness(&corpus);
        let listing_price_guidance = market::listing_price_guidance(&corpus, &item.materials);
        let audience = market::audience(&corpus, item.price);
        let marketing_suggestions = market::marketing_suggestions(&SuggestionInputs {
            eco_impact_score: tags.map(|tags| tags.eco_impact_score),
            seasonal: &seasonal,
            market: &market_analysis,
            uniqueness_score,
            sentiment: &sentiment,
            audience: &audience,
        });
        let heritage = heritage::analyze(&corpus, item.location.as_deref(), &item.materials);

        Some(TextInsights {
            sentiment,
            seasonal,
            market: market_analysis,
            uniqueness_score,
            listing_price_guidance,
            audience,
            marketing_suggestions,
            heritage,
        })
    }
}

pub fn analyzer_for(mode: TextAnalysisMode) -> Box<dyn TextAnalyzer> {
    match mode {
        TextAnalysisMode::Basic => Box::new(BasicTextAnalyzer),
        TextAnalysisMode::Enhanced => Box::new(EnhancedTextAnalyzer),
    }
}
