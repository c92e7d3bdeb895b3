use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use warp::Filter;
use warp::reply::Json;

use crate::queue::QueueEngine;
use crate::triage::{evaluate_triage, VitalsSnapshot};

#[derive(Debug, Deserialize)]
pub struct TriageRequest {
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub vitals: VitalsSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub patient_id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub symptoms: String,
}

#[derive(Debug, Deserialize)]
pub struct VitalsSubmission {
    pub patient_id: String,
    #[serde(default)]
    pub vitals: VitalsSnapshot,
    pub symptoms: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct RestApi {
    queue: Arc<QueueEngine>,
}

impl RestApi {
    pub fn new(queue: Arc<QueueEngine>) -> Self {
        RestApi { queue }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.evaluate()
            .or(self.check_in())
            .or(self.submit_vitals())
            .or(self.get_queue())
            .or(self.remove_patient())
    }

    /// Stateless triage evaluation; nothing is stored.
    fn evaluate(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("triage" / "evaluate")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(|request: TriageRequest| async move {
                let result = evaluate_triage(&request.symptoms, &request.vitals);

                let response = ApiResponse {
                    status: "success".to_string(),
                    message: "Triage evaluated".to_string(),
                    data: Some(serde_json::to_value(result).unwrap()),
                };
                Ok::<Json, Infallible>(warp::reply::json(&response))
            })
    }

    fn check_in(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let queue = Arc::clone(&self.queue);

        warp::path!("queue" / "checkin")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |request: CheckInRequest| {
                let queue = Arc::clone(&queue);
                async move {
                    match queue.check_in(request.patient_id, request.name, request.symptoms) {
                        Ok(entry) => {
                            info!(
                                "Checked in {} as {} (score {})",
                                entry.patient_id,
                                entry.triage.category.as_str(),
                                entry.triage.score
                            );
                            let response = ApiResponse {
                                status: "success".to_string(),
                                message: "Patient checked in".to_string(),
                                data: Some(serde_json::to_value(entry).unwrap()),
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                        Err(err) => {
                            let response = ApiResponse {
                                status: "error".to_string(),
                                message: err.to_string(),
                                data: None,
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                    }
                }
            })
    }

    fn submit_vitals(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let queue = Arc::clone(&self.queue);

        warp::path!("queue" / "vitals")
            .and(warp::post())
            .and(warp::body::json())
            .and_then(move |request: VitalsSubmission| {
                let queue = Arc::clone(&queue);
                async move {
                    match queue.record_vitals(&request.patient_id, request.vitals, request.symptoms) {
                        Ok(entry) => {
                            info!(
                                "Re-scored {} as {} (score {})",
                                entry.patient_id,
                                entry.triage.category.as_str(),
                                entry.triage.score
                            );
                            let response = ApiResponse {
                                status: "success".to_string(),
                                message: "Vitals recorded".to_string(),
                                data: Some(serde_json::to_value(entry).unwrap()),
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                        Err(err) => {
                            let response = ApiResponse {
                                status: "error".to_string(),
                                message: err.to_string(),
                                data: None,
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                    }
                }
            })
    }

    /// Priority-ordered queue listing for the dashboards. Readers take the
    /// stored category and score as-is; triage is never recomputed here.
    fn get_queue(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let queue = Arc::clone(&self.queue);

        warp::path!("queue")
            .and(warp::get())
            .and_then(move || {
                let queue = Arc::clone(&queue);
                async move {
                    let listing = queue.list();

                    let response = ApiResponse {
                        status: "success".to_string(),
                        message: format!("{} patients waiting", listing.len()),
                        data: Some(serde_json::to_value(listing).unwrap()),
                    };
                    Ok::<Json, Infallible>(warp::reply::json(&response))
                }
            })
    }

    fn remove_patient(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let queue = Arc::clone(&self.queue);

        warp::path!("queue" / String)
            .and(warp::delete())
            .and_then(move |patient_id: String| {
                let queue = Arc::clone(&queue);
                async move {
                    match queue.remove(&patient_id) {
                        Ok(entry) => {
                            info!("Removed {} from the queue", entry.patient_id);
                            let response = ApiResponse {
                                status: "success".to_string(),
                                message: "Patient removed".to_string(),
                                data: Some(serde_json::to_value(entry).unwrap()),
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                        Err(err) => {
                            let response = ApiResponse {
                                status: "error".to_string(),
                                message: err.to_string(),
                                data: None,
                            };
                            Ok::<Json, Infallible>(warp::reply::json(&response))
                        }
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api() -> RestApi {
        RestApi::new(Arc::new(QueueEngine::new()))
    }

    #[tokio::test]
    async fn evaluate_reports_score_and_category() {
        let api = test_api();
        let routes = api.routes();

        let response = warp::test::request()
            .method("POST")
            .path("/triage/evaluate")
            .json(&serde_json::json!({
                "symptoms": "chest pain",
                "vitals": { "spo2": 85.0 }
            }))
            .reply(&routes)
            .await;

        assert_eq!(response.status(), 200);
        let body: ApiResponse = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body.status, "success");

        let data = body.data.unwrap();
        assert_eq!(data["score"], 100);
        assert_eq!(data["category"], "red");
    }

    #[tokio::test]
    async fn queue_lists_patients_most_urgent_first() {
        let api = test_api();
        let routes = api.routes();

        for (id, symptoms) in [("a", "rash"), ("b", "stroke"), ("c", "fever")] {
            let response = warp::test::request()
                .method("POST")
                .path("/queue/checkin")
                .json(&serde_json::json!({ "patient_id": id, "symptoms": symptoms }))
                .reply(&routes)
                .await;
            assert_eq!(response.status(), 200);
        }

        let response = warp::test::request()
            .method("GET")
            .path("/queue")
            .reply(&routes)
            .await;

        let body: ApiResponse = serde_json::from_slice(response.body()).unwrap();
        let ids: Vec<String> = body
            .data
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["patient_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn vitals_for_unknown_patient_report_an_error() {
        let api = test_api();
        let routes = api.routes();

        let response = warp::test::request()
            .method("POST")
            .path("/queue/vitals")
            .json(&serde_json::json!({
                "patient_id": "ghost",
                "vitals": { "heart_rate": 130.0 }
            }))
            .reply(&routes)
            .await;

        let body: ApiResponse = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body.status, "error");
        assert!(body.data.is_none());
    }
}
