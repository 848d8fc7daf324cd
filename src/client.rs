// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client facade for one Bird Buddy account.
//!
//! Every fetch follows the same steps: make sure the session holds a valid
//! access token, issue one GraphQL request, decode it, and swap the result
//! into the cache. The session is guarded by an async mutex held for the
//! whole validation, so concurrent callers share a single token exchange.

use crate::config::Config;
use crate::error::{
    AuthError, Error, Result, TransportError, ValidationError, FIRMWARE_UPDATE_IN_PROGRESS_CODE,
};
use crate::language::LanguageCode;
use crate::models::collection::CollectionNode;
use crate::models::{
    null_as_default, Collection, CollectionMedia, Feed, FeedNode, FeedNodeType, Feeder,
    FeederOptions, FinishOptions, FinishStep, FirmwareUpdateStatus, PostcardSighting,
    PowerProfile, SettingChange, SightingReport, User,
};
use crate::queries;
use crate::services::{
    decode, Credentials, GraphqlRequest, HttpTransport, Session, SessionState, Transport,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

/// Number of media entries requested per collection.
pub const COLLECTION_MEDIA_PAGE_SIZE: u32 = 20;

/// Number of feed items requested per page.
pub const FEED_PAGE_SIZE: u32 = 20;

/// Feeder re-reads while waiting for a setting change to apply.
pub const SETTING_POLL_ATTEMPTS: u32 = 10;

/// Bird Buddy API client.
pub struct BirdBuddy<T: Transport = HttpTransport> {
    transport: T,
    session: Mutex<Session>,
    language: RwLock<LanguageCode>,
    feeders: RwLock<Arc<Vec<Feeder>>>,
    collections: RwLock<Arc<HashMap<String, Collection>>>,
    last_feed_date: RwLock<Option<DateTime<Utc>>>,
    poll_interval: Duration,
}

impl BirdBuddy<HttpTransport> {
    /// Client for the production service with the given account.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let config = Config {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Self::with_transport(transport, config)
    }
}

impl<T: Transport> BirdBuddy<T> {
    /// Client over an arbitrary transport.
    ///
    /// Credentials in `config` are validated here but not used until the
    /// first request.
    pub fn with_transport(transport: T, config: &Config) -> Result<Self> {
        let mut session = Session::new(config.session_policy());
        match (&config.email, &config.password) {
            (Some(email), Some(password)) => {
                session = session.with_credentials(Credentials::new(email, password)?);
            }
            (None, None) => {}
            (None, Some(_)) => return Err(ValidationError::EmptyField("email").into()),
            (Some(_), None) => return Err(ValidationError::EmptyField("password").into()),
        }

        Ok(Self {
            transport,
            session: Mutex::new(session),
            language: RwLock::new(config.language.clone()),
            feeders: RwLock::new(Arc::new(Vec::new())),
            collections: RwLock::new(Arc::new(HashMap::new())),
            last_feed_date: RwLock::new(None),
            poll_interval: config.poll_interval(),
        })
    }

    /// Resume from saved tokens instead of logging in.
    pub fn with_tokens(
        mut self,
        refresh_token: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        self.session = Mutex::new(
            self.session
                .into_inner()
                .with_tokens(refresh_token, access_token, Utc::now()),
        );
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Log in with new credentials, replacing any existing session.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(email, password)?;
        let mut session = self.session.lock().await;
        session.login(&self.transport, credentials, Utc::now()).await?;
        Ok(())
    }

    /// Drop the session and all cached data.
    pub async fn logout(&self) {
        self.session.lock().await.logout();
        *self.feeders.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(Vec::new());
        *self.collections.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(HashMap::new());
        *self.last_feed_date.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Profile returned by the last login.
    pub async fn user(&self) -> Option<User> {
        self.session.lock().await.user().cloned()
    }

    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state(Utc::now())
    }

    pub fn language_code(&self) -> LanguageCode {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the language of future responses. Cached data is kept.
    pub fn set_language_code(&self, tag: &str) -> Result<()> {
        let language = LanguageCode::parse(tag)?;
        tracing::debug!(language = %language, "Language changed");
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;
        Ok(())
    }

    /// Feeders from the last [`refresh_feeders`](Self::refresh_feeders).
    pub fn feeders(&self) -> Arc<Vec<Feeder>> {
        Arc::clone(&self.feeders.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Fetch the account's feeders and replace the cache.
    pub async fn refresh_feeders(&self) -> Result<Arc<Vec<Feeder>>> {
        let data: MeData<MeFeeders> = self.query(GraphqlRequest::new(queries::FEEDERS)).await?;
        let feeders = Arc::new(data.me.feeders);

        tracing::info!(count = feeders.len(), "Feeders refreshed");
        *self.feeders.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&feeders);
        Ok(feeders)
    }

    /// Cached bird collections whose cover media is still reachable.
    pub fn collections(&self) -> HashMap<String, Collection> {
        let now = Utc::now();
        let cached = Arc::clone(&self.collections.read().unwrap_or_else(PoisonError::into_inner));
        cached
            .iter()
            .filter(|(_, collection)| !collection.is_cover_expired(now))
            .map(|(id, collection)| (id.clone(), collection.clone()))
            .collect()
    }

    /// Fetch the account's bird collections in the current language and
    /// replace the cache.
    pub async fn refresh_collections(&self) -> Result<Arc<HashMap<String, Collection>>> {
        let language = self.language_code();
        // Localization comes from the Accept-Language header set in `query`;
        // the variable only records the language the request was made in.
        let request = GraphqlRequest::new(queries::COLLECTIONS)
            .with_variable("languageCode", json!(language.as_str()));

        let data: MeData<MeCollections> = self.query(request).await?;
        let total = data.me.collections.len();
        let collections: HashMap<_, _> = data
            .me
            .collections
            .into_iter()
            .filter_map(CollectionNode::into_bird_collection)
            .map(|collection| (collection.id.clone(), collection))
            .collect();
        let collections = Arc::new(collections);

        tracing::info!(
            count = collections.len(),
            skipped = total - collections.len(),
            language = %language,
            "Collections refreshed"
        );
        *self.collections.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&collections);
        Ok(collections)
    }

    /// Most recent media of one collection, newest first.
    pub async fn collection_media(&self, collection_id: &str) -> Result<Vec<CollectionMedia>> {
        let collection_id = required("collection_id", collection_id)?;

        let request = GraphqlRequest::new(queries::COLLECTION_MEDIA)
            .with_variable("collectionId", json!(collection_id))
            .with_variable("first", json!(COLLECTION_MEDIA_PAGE_SIZE));
        let data: CollectionMediaData = self.query(request).await?;

        let Some(collection) = data.collection else {
            tracing::debug!(collection_id, "Collection not found");
            return Ok(Vec::new());
        };
        Ok(collection
            .media
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .collect())
    }

    /// One page of the feed, newest first. `after` is the end cursor of a
    /// previous page and selects older items.
    pub async fn feed(&self, first: u32, after: Option<&str>) -> Result<Feed> {
        let mut request = GraphqlRequest::new(queries::FEED).with_variable("first", json!(first));
        if let Some(after) = after {
            request = request.with_variable("after", json!(after));
        }
        let data: MeData<MeFeed> = self.query(request).await?;
        Ok(data.me.feed)
    }

    /// Timestamp of the newest feed item seen by [`refresh_feed`](Self::refresh_feed).
    pub fn last_feed_date(&self) -> Option<DateTime<Utc>> {
        *self.last_feed_date.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed items newer than `since`, or than the newest item seen by the
    /// previous call when `since` is `None`.
    ///
    /// The newest timestamp in the fetched page becomes the new default.
    pub async fn refresh_feed(&self, since: Option<DateTime<Utc>>) -> Result<Vec<FeedNode>> {
        let since = since.or_else(|| self.last_feed_date());
        let feed = self.feed(FEED_PAGE_SIZE, None).await?;

        if let Some(newest) = feed.newest().map(|node| node.created_at) {
            let mut last = self.last_feed_date.write().unwrap_or_else(PoisonError::into_inner);
            if *last != Some(newest) {
                tracing::debug!(previous = ?*last, newest = %newest, "Latest feed timestamp updated");
                *last = Some(newest);
            }
        }

        let fresh = feed.filter(&[], since);
        tracing::info!(count = fresh.len(), "Feed refreshed");
        Ok(fresh)
    }

    /// Items of the first feed page of any of `types`.
    pub async fn feed_nodes(&self, types: &[FeedNodeType]) -> Result<Vec<FeedNode>> {
        let feed = self.feed(FEED_PAGE_SIZE, None).await?;
        Ok(feed.filter(types, None))
    }

    /// New postcards, each of which can be turned into a sighting with
    /// [`sighting_from_postcard`](Self::sighting_from_postcard).
    pub async fn new_postcards(&self) -> Result<Vec<FeedNode>> {
        self.feed_nodes(&[FeedNodeType::NewPostcard]).await
    }

    /// Ask the service to identify the birds on a postcard.
    pub async fn sighting_from_postcard(&self, postcard_id: &str) -> Result<PostcardSighting> {
        let postcard_id = required("postcard_id", postcard_id)?;
        let request = GraphqlRequest::new(queries::SIGHTING_FROM_POSTCARD).with_variable(
            "sightingCreateFromPostcardInput",
            json!({ "feedItemId": postcard_id }),
        );
        let data: SightingFromPostcardData = self.query(request).await?;
        Ok(data.sighting)
    }

    /// Assign a species to one sighting; returns the updated report.
    pub async fn sighting_choose_species(
        &self,
        sighting_id: &str,
        species_id: &str,
        report_token: &str,
    ) -> Result<SightingReport> {
        let request = GraphqlRequest::new(queries::SIGHTING_CHOOSE_SPECIES).with_variable(
            "sightingChooseSpeciesInput",
            json!({
                "sightingId": required("sighting_id", sighting_id)?,
                "speciesId": required("species_id", species_id)?,
                "reportToken": required("report_token", report_token)?,
            }),
        );
        let data: ChooseSpeciesData = self.query(request).await?;
        Ok(data.report)
    }

    /// Turn one sighting into a mystery visitor; returns the updated report.
    pub async fn sighting_choose_mystery(
        &self,
        sighting_id: &str,
        report_token: &str,
    ) -> Result<SightingReport> {
        let request = GraphqlRequest::new(queries::SIGHTING_CHOOSE_MYSTERY).with_variable(
            "sightingConvertToMysteryVisitorInput",
            json!({
                "sightingId": required("sighting_id", sighting_id)?,
                "reportToken": required("report_token", report_token)?,
            }),
        );
        let data: ChooseMysteryData = self.query(request).await?;
        Ok(data.report)
    }

    /// Collect a postcard into the account's collections.
    ///
    /// Sightings the service was unsure about are resolved as far as
    /// `options.strategy` allows; the rest are submitted as they are.
    pub async fn finish_postcard(
        &self,
        feed_item_id: &str,
        sighting: &PostcardSighting,
        options: &FinishOptions,
    ) -> Result<bool> {
        let feed_item_id = required("feed_item_id", feed_item_id)?;
        let mut report = sighting.sighting_report.clone();

        let plan: Vec<(String, FinishStep)> = report
            .finishing_plan(options.confidence_threshold)
            .into_iter()
            .map(|(s, step)| (s.id.clone(), step))
            .collect();
        for (sighting_id, step) in plan {
            if step == FinishStep::Recognized {
                continue;
            }
            if step.strategy() > options.strategy {
                tracing::info!(
                    sighting_id = %sighting_id,
                    requested = ?options.strategy,
                    recommended = ?step.strategy(),
                    "Leaving sighting as reported"
                );
                continue;
            }
            let token = report_token(&report)?;
            report = match step {
                FinishStep::BestGuess {
                    species_id,
                    confidence,
                } => {
                    tracing::debug!(
                        sighting_id = %sighting_id,
                        species_id = %species_id,
                        confidence,
                        "Choosing best guess"
                    );
                    self.sighting_choose_species(&sighting_id, &species_id, &token)
                        .await?
                }
                FinishStep::Mystery => {
                    tracing::debug!(sighting_id = %sighting_id, "Converting to mystery visitor");
                    self.sighting_choose_mystery(&sighting_id, &token).await?
                }
                FinishStep::Recognized => continue,
            };
        }

        let mut input = json!({
            "feedItemId": feed_item_id,
            "defaultCoverMedia": report.unlocked_covers(),
            "notSelectedMediaIds": [],
            "reportToken": report_token(&report)?,
        });
        if let Some(video) = &sighting.video_media {
            input["videoMediaId"] = json!(video.id);
        }
        let request = GraphqlRequest::new(queries::FINISH_POSTCARD)
            .with_variable("sightingReportPostcardFinishInput", input);
        let data: FinishPostcardData = self.query(request).await?;
        let success = data.result.success;
        tracing::info!(feed_item_id, success, "Postcard finished");

        if options.share_media && !sighting.medias.is_empty() {
            let media_ids: Vec<String> = sighting.medias.iter().map(|m| m.id.clone()).collect();
            // Sharing is best effort; the postcard is already collected.
            match self.share_medias(&media_ids, true).await {
                Ok(shared) => tracing::info!(count = media_ids.len(), shared, "Media shared"),
                Err(e) => tracing::error!(count = media_ids.len(), error = %e, "Sharing media failed"),
            }
        }
        Ok(success)
    }

    /// Share media with the community, or stop sharing it.
    pub async fn share_medias(&self, media_ids: &[String], share: bool) -> Result<bool> {
        if media_ids.is_empty() {
            return Err(ValidationError::EmptyField("media_ids").into());
        }
        let request = GraphqlRequest::new(queries::SHARE_MEDIAS).with_variable(
            "mediaShareToggleInput",
            json!({ "mediaIds": media_ids, "share": share }),
        );
        let data: ShareMediasData = self.query(request).await?;
        Ok(data.result.success)
    }

    /// Update an owned feeder's options and the cached copy.
    pub async fn set_feeder_options(
        &self,
        feeder_id: &str,
        options: &FeederOptions,
    ) -> Result<Feeder> {
        let feeder_id = required("feeder_id", feeder_id)?;
        if options.is_empty() {
            return Err(ValidationError::EmptyField("options").into());
        }
        self.warn_unless_owner(feeder_id, "Feeder options");

        let request = GraphqlRequest::new(queries::SET_FEEDER_OPTIONS)
            .with_variable("feederId", json!(feeder_id))
            .with_variable("feederUpdateInput", json!(options));
        let data: FeederUpdateData = self.query(request).await?;

        let updated = data.feeder;
        tracing::info!(feeder_id, "Feeder options updated");
        self.update_cached_feeder(feeder_id, |feeder| *feeder = updated.clone());
        Ok(updated)
    }

    /// Change an owned feeder's power profile. Returns the profile the
    /// feeder reports once the change has been applied.
    pub async fn set_power_profile(
        &self,
        feeder_id: &str,
        profile: PowerProfile,
    ) -> Result<PowerProfile> {
        let feeder_id = required("feeder_id", feeder_id)?;
        if profile == PowerProfile::Unknown {
            return Err(ValidationError::UnsupportedValue {
                field: "power_profile",
                value: format!("{profile:?}"),
            }
            .into());
        }
        self.warn_unless_owner(feeder_id, "Power profile");

        let request = GraphqlRequest::new(queries::UPDATE_POWER_PROFILE)
            .with_variable("feederId", json!(feeder_id))
            .with_variable(
                "feederUpdatePowerProfileInput",
                json!({ "powerProfile": profile }),
            );
        // Frenzy mode can fail with PAYMENTS_SUBSCRIPTION_IS_NOT_ACTIVE.
        let data: PowerProfileData = self.query(request).await?;

        self.settle(
            feeder_id,
            &data.change,
            profile,
            |settings| settings.power_profile,
            |feeder| feeder.power_profile,
            |feeder, value| feeder.power_profile = Some(value),
        )
        .await
    }

    /// Turn off-grid mode on or off. Returns the value the feeder reports.
    pub async fn toggle_off_grid(&self, feeder_id: &str, off_grid: bool) -> Result<bool> {
        let feeder_id = required("feeder_id", feeder_id)?;
        self.warn_unless_owner(feeder_id, "Off-grid");

        let request = GraphqlRequest::new(queries::TOGGLE_OFF_GRID)
            .with_variable("feederId", json!(feeder_id))
            .with_variable("feederToggleOffGridInput", json!({ "offGrid": off_grid }));
        let data: ToggleOffGridData = self.query(request).await?;

        self.settle(
            feeder_id,
            &data.change,
            off_grid,
            |settings| settings.off_grid,
            |feeder| feeder.off_grid,
            |feeder, value| feeder.off_grid = Some(value),
        )
        .await
    }

    /// Turn audio capture on or off. Returns the value the feeder reports.
    pub async fn toggle_audio_enabled(&self, feeder_id: &str, audio_enabled: bool) -> Result<bool> {
        let feeder_id = required("feeder_id", feeder_id)?;
        self.warn_unless_owner(feeder_id, "Audio setting");

        let request = GraphqlRequest::new(queries::TOGGLE_AUDIO)
            .with_variable("feederId", json!(feeder_id))
            .with_variable(
                "feederToggleAudioInput",
                json!({ "audioEnabled": audio_enabled }),
            );
        let data: ToggleAudioData = self.query(request).await?;

        self.settle(
            feeder_id,
            &data.change,
            audio_enabled,
            |settings| settings.audio_enabled,
            |feeder| feeder.audio_enabled,
            |feeder, value| feeder.audio_enabled = Some(value),
        )
        .await
    }

    /// Status of a feeder's firmware update.
    pub async fn update_firmware_check(&self, feeder_id: &str) -> Result<FirmwareUpdateStatus> {
        let feeder_id = required("feeder_id", feeder_id)?;
        self.warn_unless_owner(feeder_id, "Firmware update");

        let request = GraphqlRequest::new(queries::FIRMWARE_UPDATE_CHECK)
            .with_variable("feederId", json!(feeder_id));
        let data: FirmwareCheckData = self.query(request).await?;
        self.record_firmware(feeder_id, &data.status);
        Ok(data.status)
    }

    /// Start a firmware update unless one is already running.
    pub async fn update_firmware_start(&self, feeder_id: &str) -> Result<FirmwareUpdateStatus> {
        let feeder_id = required("feeder_id", feeder_id)?;
        let current = self.update_firmware_check(feeder_id).await?;
        if current.is_in_progress() {
            tracing::debug!(feeder_id, progress = ?current.progress(), "Firmware update already running");
            return Ok(current);
        }

        let request = GraphqlRequest::new(queries::FIRMWARE_UPDATE_START)
            .with_variable("feederId", json!(feeder_id));
        match self.query::<FirmwareStartData>(request).await {
            Ok(data) => {
                tracing::info!(feeder_id, status = ?data.status, "Firmware update started");
                self.record_firmware(feeder_id, &data.status);
                Ok(data.status)
            }
            Err(Error::Transport(e))
                if e.graphql_code() == Some(FIRMWARE_UPDATE_IN_PROGRESS_CODE) =>
            {
                Ok(current)
            }
            Err(e) => Err(e),
        }
    }

    /// Run an authenticated query, re-authenticating once if the service
    /// rejects the access token.
    async fn query<R: DeserializeOwned>(&self, request: GraphqlRequest) -> Result<R> {
        let request = request.with_language(self.language_code());
        let token = self.valid_access_token().await?;

        let data = match self
            .transport
            .execute(request.clone().with_auth_token(token.clone()))
            .await
        {
            Ok(data) => data,
            Err(e) if e.is_token_expired() => {
                tracing::info!(
                    operation = request.operation.name,
                    "Access token rejected, re-authenticating"
                );
                self.session.lock().await.invalidate_access_token(&token);
                let token = self.valid_access_token().await?;
                self.transport
                    .execute(request.with_auth_token(token))
                    .await?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(decode(data)?)
    }

    async fn valid_access_token(&self) -> Result<String> {
        let mut session = self.session.lock().await;
        session.ensure_valid(&self.transport, Utc::now()).await?;
        session
            .access_token()
            .map(str::to_owned)
            .ok_or(Error::Auth(AuthError::NoCredentials))
    }

    /// Wait for a setting change to show up on the feeder, then record it
    /// in the cache.
    ///
    /// The mutation's own answer is used when it is final and matches;
    /// otherwise the feeders are re-read a bounded number of times.
    async fn settle<V>(
        &self,
        feeder_id: &str,
        change: &SettingChange,
        wanted: V,
        reported: fn(&crate::models::FeederSettings) -> Option<V>,
        current: fn(&Feeder) -> Option<V>,
        apply: fn(&mut Feeder, V),
    ) -> Result<V>
    where
        V: Copy + PartialEq + std::fmt::Debug,
    {
        let mut value = reported(&change.settings());
        let mut in_progress = change.is_in_progress();
        let mut attempt = 0;
        while (in_progress || value != Some(wanted)) && attempt < SETTING_POLL_ATTEMPTS {
            attempt += 1;
            tracing::debug!(feeder_id, attempt, ?value, ?wanted, "Waiting for feeder setting");
            tokio::time::sleep(self.poll_interval).await;
            self.refresh_feeders().await?;
            value = self.cached_feeder(feeder_id).as_ref().and_then(current);
            in_progress = false;
        }

        let value = value.ok_or(TransportError::NoResponse)?;
        if value != wanted {
            tracing::warn!(feeder_id, ?value, ?wanted, "Feeder setting not applied");
        }
        self.update_cached_feeder(feeder_id, |feeder| apply(feeder, value));
        Ok(value)
    }

    fn cached_feeder(&self, feeder_id: &str) -> Option<Feeder> {
        self.feeders()
            .iter()
            .find(|feeder| feeder.id == feeder_id)
            .cloned()
    }

    /// Copy-on-write update of one cached feeder; readers keep their snapshot.
    fn update_cached_feeder(&self, feeder_id: &str, update: impl FnOnce(&mut Feeder)) {
        let mut cached = self.feeders.write().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = cached.iter().position(|feeder| feeder.id == feeder_id) else {
            return;
        };
        update(&mut Arc::make_mut(&mut cached)[index]);
    }

    fn warn_unless_owner(&self, feeder_id: &str, setting: &str) {
        if let Some(feeder) = self.cached_feeder(feeder_id) {
            if !feeder.is_owner() {
                tracing::warn!(feeder_id, setting, "Only available to the feeder owner");
            }
        }
    }

    fn record_firmware(&self, feeder_id: &str, status: &FirmwareUpdateStatus) {
        if let Some(installed) = status.installed() {
            self.update_cached_feeder(feeder_id, |feeder| {
                if installed.firmware_version.is_some() {
                    feeder.firmware_version = installed.firmware_version.clone();
                }
                if installed.available_firmware_version.is_some() {
                    feeder.available_firmware_version = installed.available_firmware_version.clone();
                }
            });
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field).into());
    }
    Ok(value)
}

fn report_token(report: &SightingReport) -> Result<String> {
    report
        .report_token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ValidationError::EmptyField("report_token").into())
}

#[derive(Debug, Deserialize)]
struct MeData<M> {
    me: M,
}

#[derive(Debug, Deserialize)]
struct MeFeeders {
    #[serde(default, deserialize_with = "null_as_default")]
    feeders: Vec<Feeder>,
}

#[derive(Debug, Deserialize)]
struct MeCollections {
    #[serde(default, deserialize_with = "null_as_default")]
    collections: Vec<CollectionNode>,
}

#[derive(Debug, Deserialize)]
struct CollectionMediaData {
    #[serde(default)]
    collection: Option<MediaCollection>,
}

#[derive(Debug, Deserialize)]
struct MediaCollection {
    media: MediaConnection,
}

#[derive(Debug, Deserialize)]
struct MediaConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    edges: Vec<MediaEdge>,
}

#[derive(Debug, Deserialize)]
struct MediaEdge {
    node: CollectionMedia,
}

#[derive(Debug, Deserialize)]
struct MeFeed {
    #[serde(default, deserialize_with = "null_as_default")]
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct SightingFromPostcardData {
    #[serde(rename = "sightingCreateFromPostcard")]
    sighting: PostcardSighting,
}

#[derive(Debug, Deserialize)]
struct ChooseSpeciesData {
    #[serde(rename = "sightingChooseSpecies")]
    report: SightingReport,
}

#[derive(Debug, Deserialize)]
struct ChooseMysteryData {
    #[serde(rename = "sightingConvertToMysteryVisitor")]
    report: SightingReport,
}

#[derive(Debug, Deserialize)]
struct Success {
    #[serde(default, deserialize_with = "null_as_default")]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct FinishPostcardData {
    #[serde(rename = "sightingReportPostcardFinish")]
    result: Success,
}

#[derive(Debug, Deserialize)]
struct ShareMediasData {
    #[serde(rename = "mediaShareToggle")]
    result: Success,
}

#[derive(Debug, Deserialize)]
struct FeederUpdateData {
    #[serde(rename = "feederUpdate")]
    feeder: Feeder,
}

#[derive(Debug, Deserialize)]
struct PowerProfileData {
    #[serde(rename = "feederUpdatePowerProfile")]
    change: SettingChange,
}

#[derive(Debug, Deserialize)]
struct ToggleOffGridData {
    #[serde(rename = "feederToggleOffGrid")]
    change: SettingChange,
}

#[derive(Debug, Deserialize)]
struct ToggleAudioData {
    #[serde(rename = "feederToggleAudio")]
    change: SettingChange,
}

#[derive(Debug, Deserialize)]
struct FirmwareCheckData {
    #[serde(rename = "feederFirmwareUpdateCheckProgress")]
    status: FirmwareUpdateStatus,
}

#[derive(Debug, Deserialize)]
struct FirmwareStartData {
    #[serde(rename = "feederFirmwareUpdateStart")]
    status: FirmwareUpdateStatus,
}
