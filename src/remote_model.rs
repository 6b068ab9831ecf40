//! # Remote Model Module
//!
//! `FruitModel` backed by a TensorFlow-Serving style REST predict endpoint.

use anyhow::{anyhow, Context, Result};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::ModelConfig;
use crate::classifier::FruitModel;
use crate::image_input::{ImageTensor, MODEL_CHANNELS};

#[derive(Serialize)]
struct PredictRequest {
    /// One `[height][width][channel]` image per instance
    instances: Vec<Vec<Vec<[f32; MODEL_CHANNELS]>>>,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

/// Classifier reached over HTTP
pub struct RemoteModel {
    client: Client,
    config: ModelConfig,
}

impl RemoteModel {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build model HTTP client")?;
        Ok(Self { client, config })
    }
}

fn to_instance(tensor: &ImageTensor) -> Vec<Vec<[f32; MODEL_CHANNELS]>> {
    (0..tensor.height)
        .map(|row| (0..tensor.width).map(|col| tensor.pixel(row, col)).collect())
        .collect()
}

impl FruitModel for RemoteModel {
    async fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>> {
        let request = PredictRequest {
            instances: vec![to_instance(input)],
        };

        debug!("Sending {:?} tensor to {}", input.shape(), self.config.url);
        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .context("Model request failed")?
            .error_for_status()
            .context("Model endpoint returned an error status")?;

        let body: PredictResponse = response
            .json()
            .await
            .context("Model response was not valid prediction JSON")?;

        body.predictions
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Model response contained no predictions"))
    }
}
