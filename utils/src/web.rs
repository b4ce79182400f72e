//! Session handling for the VEuPathDB component sites (PlasmoDB, ToxoDB, ...)

use anyhow::Context;
use reqwest::blocking::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Blocking HTTP session for one VEuPathDB project
pub struct Session {
    project: String,
    base_url: String,
    client: Client,
}

/// Base URL for a project, i.e., `PlasmoDB` -> `https://PlasmoDB.org`
pub fn base_url(project: &str) -> String {
    format!("https://{}.org", project)
}

impl Session {
    /// Open a session for `project` and check that the site answers
    pub fn connect(project: &str) -> anyhow::Result<Self> {
        let base_url = base_url(project);
        info!("Attempting to connect to {}", base_url);
        let client = Client::builder()
            .build()
            .with_context(|| "Could not set up HTTP client")?;
        client.get(&base_url).send().with_context(|| {
            format!(
                "Cannot connect to {}. Please check the project name '{}' is correct and try again",
                base_url, project
            )
        })?;
        info!("Connection succeeded");
        Ok(Self {
            project: project.to_owned(),
            base_url,
            client,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a service path (which should start with '/')
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and deserialize the JSON response body
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = self.url(path);
        debug!("Sending GET request to {}", url);
        let res = self.client.get(&url).send();
        let res = check_response(res, &url)?;
        let d = res
            .json::<T>()
            .with_context(|| format!("Could not parse JSON response from {}", url))?;
        info!("Data successfully retrieved");
        Ok(d)
    }

    /// POST a JSON payload to `path`, returning the response for the caller to stream
    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> anyhow::Result<Response> {
        let url = self.url(path);
        info!("Sending a POST request to {}", url);
        if log_enabled!(log::Level::Debug) {
            debug!(
                "JSON payload:\t{}",
                serde_json::to_string(payload).unwrap_or_default()
            );
        }
        let res = self.client.post(&url).json(payload).send();
        let res = check_response(res, &url)?;
        info!("Data successfully retrieved");
        Ok(res)
    }

    /// GET an absolute URL and copy the body to `w`, returning the number of bytes written
    pub fn download<W: std::io::Write>(&self, url: &str, w: &mut W) -> anyhow::Result<u64> {
        debug!("Downloading {}", url);
        let res = self.client.get(url).send();
        let mut res = check_response(res, url)?;
        res.copy_to(w)
            .with_context(|| format!("Error while downloading {}", url))
    }
}

fn check_response(res: reqwest::Result<Response>, url: &str) -> anyhow::Result<Response> {
    res.and_then(|r| r.error_for_status()).with_context(|| {
        format!(
            "Cannot retrieve data from url: {}. Please check the URL is correct. In case of an outage at VEuPathDB, please try again later",
            url
        )
    })
}
