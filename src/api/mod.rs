// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Quran text API client.
//!
//! A thin blocking client for the public text API. Every response is wrapped
//! in a `{code, status, data}` envelope; anything other than code 200 is
//! treated as a failure. Calls are made from the task worker thread, never
//! from the UI thread.

use std::time::Duration;

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::AppConfig,
    model::{AYAH_COUNT, AyahEdition, DailyAyah, SURAH_COUNT, Surah},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },
    #[error("{url} answered with code {code} ({status})")]
    Status {
        url: String,
        code: u16,
        status: String,
    },
    #[error("{url} returned no data")]
    MissingData { url: String },
    #[error("there is no surah {0}")]
    InvalidSurah(u32),
}

#[derive(Deserialize)]
struct Envelope<T> {
    code: u16,
    #[serde(default)]
    status: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct SurahVerses {
    ayahs: Vec<AyahEdition>,
}

pub(crate) struct QuranApi {
    agent: ureq::Agent,
    base_url: String,
    arabic_edition: String,
    translation_edition: String,
}

impl QuranApi {
    pub(crate) fn new(config: &AppConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();

        Self {
            agent,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            arabic_edition: config.arabic_edition.clone(),
            translation_edition: config.translation_edition.clone(),
        }
    }

    /// Fetches the list of all chapters.
    pub(crate) fn fetch_surahs(&self) -> Result<Vec<Surah>, ApiError> {
        self.get("surah")
    }

    /// Fetches a chapter's verses in the recitation edition, which carries
    /// the per-verse audio URLs.
    pub(crate) fn fetch_surah_arabic(&self, surah: u32) -> Result<Vec<AyahEdition>, ApiError> {
        self.fetch_surah_edition(surah, &self.arabic_edition)
    }

    pub(crate) fn fetch_surah_translation(&self, surah: u32) -> Result<Vec<AyahEdition>, ApiError> {
        self.fetch_surah_edition(surah, &self.translation_edition)
    }

    /// Fetches the verse of the day in both editions.
    ///
    /// # Arguments
    ///
    /// * `day_of_year` - The 1-based ordinal day of the current year.
    pub(crate) fn fetch_daily_ayah(&self, day_of_year: u32) -> Result<DailyAyah, ApiError> {
        let number = daily_ayah_number(day_of_year);

        let arabic = self.get(&format!("ayah/{number}/{}", self.arabic_edition))?;
        let translation = self.get(&format!("ayah/{number}/{}", self.translation_edition))?;

        Ok(DailyAyah {
            arabic,
            translation,
        })
    }

    fn fetch_surah_edition(&self, surah: u32, edition: &str) -> Result<Vec<AyahEdition>, ApiError> {
        if !(1..=SURAH_COUNT).contains(&surah) {
            return Err(ApiError::InvalidSurah(surah));
        }

        let verses: SurahVerses = self.get(&format!("surah/{surah}/{edition}"))?;
        Ok(verses.ayahs)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "Requesting");

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(ApiError::Status {
                    url,
                    code,
                    status: response.status_text().to_string(),
                });
            }
            Err(e) => {
                return Err(ApiError::Http {
                    url,
                    reason: e.to_string(),
                });
            }
        };

        let envelope: Envelope<T> = response.into_json().map_err(|e| ApiError::Http {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        unwrap_envelope(url, envelope)
    }
}

/// Global number of the verse shown for a given day of the year.
pub(crate) fn daily_ayah_number(day_of_year: u32) -> u32 {
    (day_of_year % AYAH_COUNT) + 1
}

fn unwrap_envelope<T>(url: String, envelope: Envelope<T>) -> Result<T, ApiError> {
    if envelope.code != 200 {
        return Err(ApiError::Status {
            url,
            code: envelope.code,
            status: envelope.status,
        });
    }

    envelope.data.ok_or(ApiError::MissingData { url })
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use super::*;

    fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn api(base_url: String) -> QuranApi {
        let config = AppConfig {
            api_base_url: base_url,
            ..AppConfig::default()
        };
        QuranApi::new(&config)
    }

    #[test]
    fn daily_number_wraps_around_the_text() {
        assert_eq!(daily_ayah_number(1), 2);
        assert_eq!(daily_ayah_number(365), 366);
        assert_eq!(daily_ayah_number(AYAH_COUNT), 1);
    }

    #[test]
    fn envelope_with_error_code_is_rejected() {
        let envelope: Envelope<Vec<Surah>> = Envelope {
            code: 404,
            status: "NOT FOUND".to_string(),
            data: None,
        };

        let err = unwrap_envelope("http://test/surah".to_string(), envelope).unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 404, .. }));
    }

    #[test]
    fn out_of_range_surah_is_rejected_without_a_request() {
        let api = api("http://127.0.0.1:9".to_string());
        assert!(matches!(api.fetch_surah_arabic(0), Err(ApiError::InvalidSurah(0))));
        assert!(matches!(
            api.fetch_surah_translation(115),
            Err(ApiError::InvalidSurah(115))
        ));
    }

    #[test]
    fn fetches_chapter_list() {
        let url = serve_once(
            r#"{"code":200,"status":"OK","data":[{"number":1,"name":"الفاتحة","englishName":"Al-Faatiha","englishNameTranslation":"The Opening","numberOfAyahs":7,"revelationType":"Meccan"}]}"#,
        );

        let surahs = api(url).fetch_surahs().unwrap();
        assert_eq!(surahs.len(), 1);
        assert_eq!(surahs[0].number_of_ayahs, 7);
    }

    #[test]
    fn fetches_chapter_verses_with_audio() {
        let url = serve_once(
            r#"{"code":200,"status":"OK","data":{"number":1,"ayahs":[{"number":1,"text":"بسم","numberInSurah":1,"audio":"https://cdn.test/1.mp3"}]}}"#,
        );

        let verses = api(url).fetch_surah_arabic(1).unwrap();
        assert_eq!(verses[0].audio.as_deref(), Some("https://cdn.test/1.mp3"));
    }
}
