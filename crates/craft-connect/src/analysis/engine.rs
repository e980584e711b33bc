use std::sync::Arc;

use serde::Serialize;

use super::domain::{AnalysisRequest, CraftText, ProductDraft};
use super::eco::{EcoImpactError, EcoImpactEstimator, EcoImpactResult, EcoProfileName};
use super::image::{merge_labels, ImageClassifier, ImageLabel};
use super::insights::{analyzer_for, TextAnalysisMode, TextAnalyzer, TextInsights};
use super::pricing::{PriceEstimate, PriceEstimator, PriceFeatures, PricingEngine};
use super::settings::AnalysisSettings;
use super::sustainability::{SustainabilityAnalyzer, SustainabilityAssessment};
use super::tagging::{AutoTagger, TaggingResult};

/// Outcome of one sub-analysis. A failed or skipped section never blocks the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Completed { result: T },
    Failed { error: String },
    Skipped { reason: String },
}

impl<T> Section<T> {
    pub fn completed(result: T) -> Self {
        Self::Completed { result }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Completed { result } => Some(result),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }
}

/// Every section of a comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub eco_profile: EcoProfileName,
    pub text_analysis: TextAnalysisMode,
    pub eco_impact: Section<EcoImpactResult>,
    pub tags: Section<TaggingResult>,
    pub sustainability: Section<SustainabilityAssessment>,
    pub pricing: Section<PriceEstimate>,
    pub insights: Section<TextInsights>,
    pub image_labels: Section<Vec<ImageLabel>>,
}

impl AnalysisResult {
    pub fn failed_sections(&self) -> Vec<&'static str> {
        [
            ("eco_impact", self.eco_impact.label()),
            ("tags", self.tags.label()),
            ("sustainability", self.sustainability.label()),
            ("pricing", self.pricing.label()),
            ("insights", self.insights.label()),
            ("image_labels", self.image_labels.label()),
        ]
        .into_iter()
        .filter(|(_, status)| *status == "failed")
        .map(|(name, _)| name)
        .collect()
    }
}

/// Composes the estimator, tagger, analyzers and pricing engine. Built once at
/// startup and shared read-only.
pub struct CraftAnalyzer {
    eco: EcoImpactEstimator,
    tagger: AutoTagger,
    sustainability: SustainabilityAnalyzer,
    pricing: PricingEngine,
    text: Box<dyn TextAnalyzer>,
    images: Option<Arc<dyn ImageClassifier>>,
}

impl Default for CraftAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisSettings::default())
    }
}

impl CraftAnalyzer {
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            eco: EcoImpactEstimator::new(settings.eco_profile),
            tagger: AutoTagger::new(),
            sustainability: SustainabilityAnalyzer::new(),
            pricing: PricingEngine::new(settings.pricing),
            text: analyzer_for(settings.text_analysis),
            images: None,
        }
    }

    pub fn with_price_estimator<E>(mut self, estimator: E) -> Self
    where
        E: PriceEstimator + 'static,
    {
        self.pricing = self.pricing.with_estimator(estimator);
        self
    }

    pub fn with_image_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ImageClassifier + 'static,
    {
        self.images = Some(Arc::new(classifier));
        self
    }

    pub fn eco_profile(&self) -> EcoProfileName {
        self.eco.profile().name
    }

    pub fn text_analysis(&self) -> TextAnalysisMode {
        self.text.mode()
    }

    pub fn eco_impact(&self, draft: &ProductDraft) -> Result<EcoImpactResult, EcoImpactError> {
        self.eco.estimate_draft(draft)
    }

    pub fn tag(&self, item: &CraftText) -> TaggingResult {
        self.tagger.tag(item)
    }

    pub fn sustainability(&self, request: &AnalysisRequest) -> SustainabilityAssessment {
        self.sustainability.analyze(request)
    }

    pub fn price(&self, features: &PriceFeatures) -> PriceEstimate {
        self.pricing.estimate(features)
    }

    pub fn insights(&self, item: &CraftText, tags: Option<&TaggingResult>) -> Option<TextInsights> {
        self.text.insights(item, tags)
    }

    /// Pricing inputs for a request, enriched by a completed sustainability
    /// assessment when one is available.
    pub fn price_features(
        request: &AnalysisRequest,
        sustainability: Option<&SustainabilityAssessment>,
    ) -> PriceFeatures {
        PriceFeatures {
            category: request.product.category.clone(),
            base_material_price: request.pricing.base_material_price,
            hours_of_labor: request.pricing.hours_of_labor,
            dimensions: request.pricing.dimensions,
            transport_distance_km: request.product.distance_km_to_market,
            region: request.pricing_region(),
            crafting_process: request
                .pricing
                .crafting_process
                .clone()
                .or_else(|| request.product.production_method.clone()),
            sustainability_index: sustainability
                .map(|assessment| assessment.overall_sustainability_index),
        }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let text = request.craft_text();

        let eco_impact = match self.eco.estimate_draft(&request.product) {
            Ok(result) => Section::completed(result),
            Err(error) => {
                tracing::debug!(%error, "eco impact section failed");
                Section::failed(error)
            }
        };

        let mut tags = self.tagger.tag(&text);
        let image_labels = self.classify_image(request, &mut tags);

        let sustainability = self.sustainability.analyze(request);
        let pricing = self
            .pricing
            .estimate(&Self::price_features(request, Some(&sustainability)));

        let insights = match self.text.insights(&text, Some(&tags)) {
            Some(insights) => Section::completed(insights),
            None => Section::skipped(format!(
                "{} text analysis does not produce insights",
                self.text.mode().label()
            )),
        };

        AnalysisResult {
            eco_profile: self.eco_profile(),
            text_analysis: self.text.mode(),
            eco_impact,
            tags: Section::completed(tags),
            sustainability: Section::completed(sustainability),
            pricing: Section::completed(pricing),
            insights,
            image_labels,
        }
    }

    fn classify_image(
        &self,
        request: &AnalysisRequest,
        tags: &mut TaggingResult,
    ) -> Section<Vec<ImageLabel>> {
        let Some(image) = request.image.as_ref() else {
            return Section::skipped("no image supplied");
        };
        let Some(classifier) = self.images.as_ref() else {
            return Section::skipped("no image classifier configured");
        };

        match classifier.classify(image) {
            Ok(labels) => {
                let added = merge_labels(tags, &labels);
                if !added.is_empty() {
                    tracing::debug!(?added, "image labels contributed categories");
                }
                Section::completed(labels)
            }
            Err(error) => {
                tracing::warn!(%error, uri = %image.uri, "image classification failed");
                Section::failed(error)
            }
        }
    }
}
