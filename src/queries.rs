// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL documents sent to the Bird Buddy API.
//!
//! Only the fields decoded by [`crate::models`] are selected.

/// Operation name and document of one GraphQL request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
    /// Variables and response may contain credentials or tokens.
    pub sensitive: bool,
}

pub const SIGN_IN: Operation = Operation {
    name: "emailSignIn",
    sensitive: true,
    document: r#"
mutation emailSignIn($emailSignInInput: EmailSignInInput!) {
  authEmailSignIn(emailSignInInput: $emailSignInInput) {
    ... on Auth {
      accessToken
      refreshToken
      me {
        user {
          avatarUrl
          email
          id
          name
          signInType
          __typename
        }
        __typename
      }
      __typename
    }
    ... on Problem {
      items {
        field
        kind
        __typename
      }
      __typename
    }
    __typename
  }
}
"#,
};

pub const REFRESH_AUTH_TOKEN: Operation = Operation {
    name: "authRefreshToken",
    sensitive: true,
    document: r#"
mutation authRefreshToken($refreshTokenInput: RefreshTokenInput!) {
  authRefreshToken(refreshTokenInput: $refreshTokenInput) {
    accessToken
    refreshToken
    __typename
  }
}
"#,
};

pub const FEEDERS: Operation = Operation {
    name: "meFeeders",
    sensitive: false,
    document: r#"
query meFeeders {
  me {
    feeders {
      ... on FeederForMember {
        ...ListFeederFields
        locationCity
        locationCountry
        ownerName
        __typename
      }
      ... on FeederForOwner {
        ...ListFeederFields
        availableFirmwareVersion
        firmwareVersion
        serialNumber
        offGrid
        audioEnabled
        powerProfile
        __typename
      }
      ... on FeederForMemberPending {
        id
        name
        __typename
      }
      __typename
    }
    __typename
  }
}
fragment ListFeederFields on FeederForPrivate {
  battery {
    charging
    percentage
    state
    __typename
  }
  food {
    state
    __typename
  }
  id
  name
  signal {
    state
    value
    __typename
  }
  state
  temperature {
    value
    __typename
  }
  __typename
}
"#,
};

/// Takes no variables. Species names are localized by the `Accept-Language`
/// header; a `languageCode` variable sent alongside is ignored by the server,
/// and declaring it here without a use would fail document validation.
pub const COLLECTIONS: Operation = Operation {
    name: "meCollections",
    sensitive: false,
    document: r#"
query meCollections {
  me {
    collections {
      ... on CollectionBird {
        ...CollectionFields
        species {
          ... on Species {
            id
            name
          }
          __typename
        }
        __typename
      }
      ... on CollectionMysteryVisitor {
        ...CollectionFields
        __typename
      }
      __typename
    }
    __typename
  }
}
fragment CollectionFields on Collection {
  id
  visitsAllTime
  visitLastTime
  coverCollectionMedia {
    feederName
    media {
      ...MediaFields
      __typename
    }
    __typename
  }
  __typename
}
fragment MediaFields on Media {
  id
  createdAt
  thumbnailUrl
  ... on MediaImage {
    contentUrl(size: ORIGINAL)
  }
  ... on MediaVideo {
    contentUrl(size: ORIGINAL)
  }
  __typename
}
"#,
};

pub const COLLECTION_MEDIA: Operation = Operation {
    name: "meCollectionsMedia",
    sensitive: false,
    document: r#"
query meCollectionsMedia($collectionId: ID!, $first: Int) {
  collection(collectionId: $collectionId) {
    ... on CollectionBird {
      id
      media(first: $first) {
        ...MediaConnectionFields
      }
    }
    ... on CollectionMysteryVisitor {
      id
      media(first: $first) {
        ...MediaConnectionFields
      }
    }
  }
}
fragment MediaConnectionFields on CollectionMediaConnection {
  edges {
    node {
      feederName
      media {
        id
        createdAt
        thumbnailUrl
        ... on MediaImage {
          contentUrl(size: ORIGINAL)
        }
        ... on MediaVideo {
          contentUrl(size: ORIGINAL)
        }
        __typename
      }
    }
  }
}
"#,
};

pub const FEED: Operation = Operation {
    name: "meFeed",
    sensitive: false,
    document: r#"
query meFeed($first: Int, $after: String) {
  me {
    feed(first: $first, after: $after) {
      edges {
        cursor
        node {
          ...FeedItemFields
          ... on FeedItemFeederInvitationDeclined {
            feederName
          }
          ... on FeedItemFeederMemberDeleted {
            feederName
          }
          ... on FeedItemMediaLiked {
            numberOfLikes
            collection {
              ...FeedCollectionFields
            }
            media {
              ...MediaFields
            }
          }
          ... on FeedItemSpeciesSighting {
            collection {
              ...FeedCollectionFields
            }
            media {
              ...MediaFields
            }
          }
          ... on FeedItemSpeciesUnlocked {
            collection {
              ...FeedCollectionFields
            }
            media {
              ...MediaFields
            }
          }
          ... on FeedItemMysteryVisitorNotRecognized {
            media {
              ...MediaFields
            }
          }
          ... on FeedItemMysteryVisitorResolved {
            media {
              ...MediaFields
            }
          }
          __typename
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
      __typename
    }
    __typename
  }
}
fragment FeedItemFields on FeedItem {
  id
  createdAt
  __typename
}
fragment FeedCollectionFields on AnyCollection {
  ... on CollectionBird {
    id
    species {
      ... on Species {
        id
        name
      }
      __typename
    }
  }
  ... on CollectionMysteryVisitor {
    id
  }
  __typename
}
fragment MediaFields on Media {
  id
  createdAt
  thumbnailUrl
  ... on MediaImage {
    contentUrl(size: ORIGINAL)
  }
  ... on MediaVideo {
    contentUrl(size: ORIGINAL)
  }
  __typename
}
"#,
};

pub const SET_FEEDER_OPTIONS: Operation = Operation {
    name: "feederUpdate",
    sensitive: false,
    document: r#"
mutation feederUpdate($feederId: ID!, $feederUpdateInput: FeederUpdateInput!) {
  feederUpdate(feederId: $feederId, feederUpdateInput: $feederUpdateInput) {
    ... on FeederForOwner {
      battery {
        charging
        percentage
        state
      }
      food {
        state
      }
      id
      name
      signal {
        state
        value
      }
      state
      temperature {
        value
      }
      audioEnabled
      availableFirmwareVersion
      firmwareVersion
      lowBatteryNotification
      lowFoodNotification
      offGrid
      powerProfile
      serialNumber
      __typename
    }
    __typename
  }
}
"#,
};

pub const UPDATE_POWER_PROFILE: Operation = Operation {
    name: "feederUpdatePowerProfile",
    sensitive: false,
    document: r#"
mutation feederUpdatePowerProfile($feederId: ID!, $feederUpdatePowerProfileInput: FeederUpdatePowerProfileInput!) {
  feederUpdatePowerProfile(feederId: $feederId, feederUpdatePowerProfileInput: $feederUpdatePowerProfileInput) {
    ... on FeederUpdatePowerProfileFinishedResult {
      feeder {
        powerProfile
      }
    }
    ... on FeederUpdatePowerProfileInProgressResult {
      feeder {
        powerProfile
      }
    }
    __typename
  }
}
"#,
};

pub const TOGGLE_OFF_GRID: Operation = Operation {
    name: "feederToggleOffGrid",
    sensitive: false,
    document: r#"
mutation feederToggleOffGrid($feederId: ID!, $feederToggleOffGridInput: FeederToggleOffGridInput!) {
  feederToggleOffGrid(feederId: $feederId, feederToggleOffGridInput: $feederToggleOffGridInput) {
    ... on FeederToggleOffGridFinishedResult {
      feeder {
        offGrid
      }
    }
    ... on FeederToggleOffGridInProgressResult {
      feeder {
        offGrid
      }
    }
    __typename
  }
}
"#,
};

pub const TOGGLE_AUDIO: Operation = Operation {
    name: "feederToggleAudio",
    sensitive: false,
    document: r#"
mutation feederToggleAudio($feederId: ID!, $feederToggleAudioInput: FeederToggleAudioInput!) {
  feederToggleAudio(feederId: $feederId, feederToggleAudioInput: $feederToggleAudioInput) {
    ... on FeederToggleAudioFinishedResult {
      feeder {
        audioEnabled
      }
    }
    ... on FeederToggleAudioInProgressResult {
      feeder {
        audioEnabled
      }
    }
    __typename
  }
}
"#,
};

pub const FIRMWARE_UPDATE_START: Operation = Operation {
    name: "feederFirmwareUpdateStart",
    sensitive: false,
    document: r#"
mutation feederFirmwareUpdateStart($feederId: ID!) {
  feederFirmwareUpdateStart(feederId: $feederId) {
    ...FirmwareUpdateFields
  }
}
fragment FirmwareUpdateFields on FeederFirmwareUpdateResult {
  ... on FeederFirmwareUpdateFailedResult {
    failedReason
  }
  ... on FeederFirmwareUpdateProgressResult {
    progress
    feeder {
      state
    }
  }
  ... on FeederFirmwareUpdateSucceededResult {
    feeder {
      availableFirmwareVersion
      firmwareVersion
    }
  }
  __typename
}
"#,
};

pub const FIRMWARE_UPDATE_CHECK: Operation = Operation {
    name: "feederFirmwareUpdateCheckProgress",
    sensitive: false,
    document: r#"
mutation feederFirmwareUpdateCheckProgress($feederId: ID!) {
  feederFirmwareUpdateCheckProgress(feederId: $feederId) {
    ...FirmwareUpdateFields
  }
}
fragment FirmwareUpdateFields on FeederFirmwareUpdateResult {
  ... on FeederFirmwareUpdateFailedResult {
    failedReason
  }
  ... on FeederFirmwareUpdateProgressResult {
    progress
    feeder {
      state
    }
  }
  ... on FeederFirmwareUpdateSucceededResult {
    feeder {
      availableFirmwareVersion
      firmwareVersion
    }
  }
  __typename
}
"#,
};

pub const SIGHTING_FROM_POSTCARD: Operation = Operation {
    name: "sightingCreateFromPostcard",
    sensitive: false,
    document: r#"
mutation sightingCreateFromPostcard($sightingCreateFromPostcardInput: SightingCreateFromPostcardInput!) {
  sightingCreateFromPostcard(sightingCreateFromPostcardInput: $sightingCreateFromPostcardInput) {
    feeder {
      id
      name
    }
    medias {
      ...MediaFields
    }
    sightingReport {
      ...SightingReportFields
    }
    videoMedia {
      ...MediaFields
    }
    __typename
  }
}
fragment MediaFields on Media {
  id
  createdAt
  thumbnailUrl
  ... on MediaImage {
    contentUrl(size: ORIGINAL)
  }
  ... on MediaVideo {
    contentUrl(size: ORIGINAL)
  }
  __typename
}
fragment SightingReportFields on SightingReport {
  reportToken
  sightings {
    id
    matchTokens
    ... on SightingCantDecideWhichBird {
      suggestions {
        species {
          id
          name
          __typename
        }
        __typename
      }
    }
    ... on SightingRecognizedBird {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    ... on SightingRecognizedBirdUnlocked {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    __typename
  }
}
"#,
};

pub const SIGHTING_CHOOSE_SPECIES: Operation = Operation {
    name: "sightingChooseSpecies",
    sensitive: false,
    document: r#"
mutation sightingChooseSpecies($sightingChooseSpeciesInput: SightingChooseSpeciesInput!) {
  sightingChooseSpecies(sightingChooseSpeciesInput: $sightingChooseSpeciesInput) {
    ...SightingReportFields
  }
}
fragment SightingReportFields on SightingReport {
  reportToken
  sightings {
    id
    matchTokens
    ... on SightingCantDecideWhichBird {
      suggestions {
        species {
          id
          name
          __typename
        }
        __typename
      }
    }
    ... on SightingRecognizedBird {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    ... on SightingRecognizedBirdUnlocked {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    __typename
  }
}
"#,
};

pub const SIGHTING_CHOOSE_MYSTERY: Operation = Operation {
    name: "sightingConvertToMysteryVisitor",
    sensitive: false,
    document: r#"
mutation sightingConvertToMysteryVisitor($sightingConvertToMysteryVisitorInput: SightingConvertToMysteryVisitorInput!) {
  sightingConvertToMysteryVisitor(sightingConvertToMysteryVisitorInput: $sightingConvertToMysteryVisitorInput) {
    ...SightingReportFields
  }
}
fragment SightingReportFields on SightingReport {
  reportToken
  sightings {
    id
    matchTokens
    ... on SightingCantDecideWhichBird {
      suggestions {
        species {
          id
          name
          __typename
        }
        __typename
      }
    }
    ... on SightingRecognizedBird {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    ... on SightingRecognizedBirdUnlocked {
      species {
        ... on Species {
          id
          name
        }
      }
    }
    __typename
  }
}
"#,
};

/// May fail with `SIGHTING_POSTCARD_ALREADY_CLAIMED`.
pub const FINISH_POSTCARD: Operation = Operation {
    name: "sightingReportPostcardFinish",
    sensitive: false,
    document: r#"
mutation sightingReportPostcardFinish($sightingReportPostcardFinishInput: SightingReportPostcardFinishInput!) {
  sightingReportPostcardFinish(sightingReportPostcardFinishInput: $sightingReportPostcardFinishInput) {
    success
    __typename
  }
}
"#,
};

pub const SHARE_MEDIAS: Operation = Operation {
    name: "mediaShareToggle",
    sensitive: false,
    document: r#"
mutation mediaShareToggle($mediaShareToggleInput: MediaShareToggleInput!) {
  mediaShareToggle(mediaShareToggleInput: $mediaShareToggleInput) {
    success
  }
}
"#,
};
