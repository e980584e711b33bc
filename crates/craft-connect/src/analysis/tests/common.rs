use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::analysis::domain::{AnalysisRequest, CraftText, ImageRef, PricingInputs, ProductDraft};
use crate::analysis::image::{ClassificationError, ImageClassifier, ImageLabel};
use crate::analysis::pricing::{FeatureValue, RegressionModel};
use crate::analysis::repository::{
    AnalysisEvent, AnalysisId, AnalysisObserver, AnalysisReport, AnalysisRepository,
    ObserverError, RepositoryError,
};
use crate::analysis::{analysis_router, AnalysisSettings, CraftAnalysisService};

pub(super) fn textile_draft() -> ProductDraft {
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

pub(super) fn glass_vase() -> CraftText {
    CraftText {
        title: "Handmade Recycled Glass Vase".to_string(),
        description: "Beautiful vase made from recycled glass bottles. Eco-friendly and \
                      sustainable, locally sourced materials."
            .to_string(),
        price: Some(45.0),
        ..CraftText::default()
    }
}

pub(super) fn wind_chimes() -> CraftText {
    CraftText::new(
        "Handmade Bamboo Wind Chimes",
        "Natural wind chimes crafted from sustainable bamboo. Locally sourced from regional \
         growers.",
    )
}

pub(super) fn organic_stole() -> AnalysisRequest {
    AnalysisRequest {
        title: "Organic Cotton Stole".to_string(),
        product: ProductDraft {
            category: Some("textiles".to_string()),
            weight_g: Some(300.0),
            packaging_weight_g: Some(40.0),
            distance_km_to_market: Some(120.0),
            percent_recycled_material: Some(20.0),
            production_method: Some("handmade".to_string()),
            materials: vec!["organic cotton".to_string()],
            description: "Hand-spun organic cotton stole woven with traditional methods. Fair \
                          trade and locally sourced."
                .to_string(),
            price: Some(60.0),
        },
        location: Some("Jaipur, Rajasthan".to_string()),
        artisan: Some("Meera Devi".to_string()),
        pricing: PricingInputs {
            base_material_price: Some(12.0),
            hours_of_labor: Some(6.0),
            ..PricingInputs::default()
        },
        image: None,
    }
}

pub(super) fn acrylic_throw() -> AnalysisRequest {
    AnalysisRequest {
        title: "Acrylic Throw".to_string(),
        product: ProductDraft {
            category: Some("textiles".to_string()),
            weight_g: Some(2000.0),
            description: "Mass production acrylic throw".to_string(),
            ..ProductDraft::default()
        },
        location: Some("Shenzhen".to_string()),
        ..AnalysisRequest::default()
    }
}

pub(super) fn with_image(mut request: AnalysisRequest) -> AnalysisRequest {
    request.image = Some(ImageRef {
        uri: "uploads/stole.jpg".to_string(),
    });
    request
}

pub(super) fn build_service() -> (
    CraftAnalysisService<MemoryRepository, MemoryObserver>,
    Arc<MemoryRepository>,
    Arc<MemoryObserver>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let observer = Arc::new(MemoryObserver::default());
    let service = CraftAnalysisService::new(
        repository.clone(),
        observer.clone(),
        AnalysisSettings::default(),
    );
    (service, repository, observer)
}

pub(super) fn analysis_router_with_service(
    service: CraftAnalysisService<MemoryRepository, MemoryObserver>,
) -> axum::Router {
    analysis_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) reports: Arc<Mutex<HashMap<AnalysisId, AnalysisReport>>>,
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, report: AnalysisReport) -> Result<AnalysisReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("repository mutex poisoned");
        if guard.contains_key(&report.analysis_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.analysis_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize, offset: usize) -> Result<Vec<AnalysisReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        let mut reports: Vec<AnalysisReport> = guard.values().cloned().collect();
        reports.sort_by(|left, right| right.analysis_id.cmp(&left.analysis_id));
        Ok(reports.into_iter().skip(offset).take(limit).collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryObserver {
    events: Arc<Mutex<Vec<AnalysisEvent>>>,
}

impl MemoryObserver {
    pub(super) fn events(&self) -> Vec<AnalysisEvent> {
        self.events.lock().expect("observer mutex poisoned").clone()
    }
}

impl AnalysisObserver for MemoryObserver {
    fn record(&self, event: AnalysisEvent) -> Result<(), ObserverError> {
        self.events
            .lock()
            .expect("observer mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct OfflineObserver;

impl AnalysisObserver for OfflineObserver {
    fn record(&self, _event: AnalysisEvent) -> Result<(), ObserverError> {
        Err(ObserverError::Unavailable("collector offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _report: AnalysisReport) -> Result<AnalysisReport, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(
        &self,
        _limit: usize,
        _offset: usize,
    ) -> Result<Vec<AnalysisReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Regression stand-in that always predicts the same price.
pub(super) struct FixedModel(pub(super) f64);

impl RegressionModel for FixedModel {
    fn predict(&self, _features: &BTreeMap<&'static str, FeatureValue>) -> Result<f64, String> {
        Ok(self.0)
    }
}

pub(super) struct MissingModel;

impl RegressionModel for MissingModel {
    fn predict(&self, _features: &BTreeMap<&'static str, FeatureValue>) -> Result<f64, String> {
        Err("model artifact not loaded".to_string())
    }
}

pub(super) struct StaticClassifier(pub(super) Vec<ImageLabel>);

impl ImageClassifier for StaticClassifier {
    fn classify(&self, _image: &ImageRef) -> Result<Vec<ImageLabel>, ClassificationError> {
        Ok(self.0.clone())
    }
}

pub(super) struct BrokenClassifier;

impl ImageClassifier for BrokenClassifier {
    fn classify(&self, image: &ImageRef) -> Result<Vec<ImageLabel>, ClassificationError> {
        Err(ClassificationError::Unreadable(image.uri.clone()))
    }
}

pub(super) fn label(text: &str, score: f64) -> ImageLabel {
    ImageLabel {
        label: text.to_string(),
        score,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
