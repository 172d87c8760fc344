use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerSet {
    pub id: i64,
    pub access_hash: i64,
    pub title: String,
    pub short_name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_date: Option<i64>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub masks: bool,
    #[serde(default)]
    pub animated: bool,
}

impl StickerSet {
    pub fn is_installed(&self) -> bool {
        self.installed_date.is_some() && !self.archived
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub mime_type: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub text: String,
    pub option: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub answers: Vec<PollAnswer>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub multiple_choice: bool,
    #[serde(default)]
    pub quiz: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswerVoters {
    pub option: Vec<u8>,
    pub voters: u32,
    #[serde(default)]
    pub chosen: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollResults {
    #[serde(default)]
    pub results: Vec<PollAnswerVoters>,
    #[serde(default)]
    pub total_voters: u32,
}

/// Group call state as pushed by the server. A discarded call only keeps
/// its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_", rename_all = "camelCase")]
pub enum GroupCall {
    GroupCall {
        id: i64,
        access_hash: i64,
        participants_count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default)]
        rtmp_stream: bool,
    },
    GroupCallDiscarded {
        id: i64,
        access_hash: i64,
    },
}

impl GroupCall {
    pub fn id(&self) -> i64 {
        match self {
            Self::GroupCall { id, .. } | Self::GroupCallDiscarded { id, .. } => *id,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::GroupCallDiscarded { .. })
    }

    pub fn participants_count(&self) -> u32 {
        match self {
            Self::GroupCall {
                participants_count, ..
            } => *participants_count,
            Self::GroupCallDiscarded { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_call_constructor_tag() {
        let call: GroupCall =
            serde_json::from_str(r#"{"_": "groupCallDiscarded", "id": 9, "access_hash": 1}"#)
                .unwrap();
        assert!(call.is_discarded());
        assert_eq!(call.id(), 9);
        assert_eq!(call.participants_count(), 0);

        let live = GroupCall::GroupCall {
            id: 10,
            access_hash: 2,
            participants_count: 31,
            title: None,
            rtmp_stream: true,
        };
        let json = serde_json::to_string(&live).unwrap();
        assert!(json.contains("\"_\":\"groupCall\""));
        assert_eq!(live.participants_count(), 31);
    }

    #[test]
    fn test_sticker_set_installed() {
        let mut set = StickerSet {
            id: 1,
            access_hash: 2,
            title: "Cats".to_string(),
            short_name: "cats".to_string(),
            count: 12,
            installed_date: Some(1_600_000_000),
            archived: false,
            masks: false,
            animated: true,
        };
        assert!(set.is_installed());

        set.archived = true;
        assert!(!set.is_installed());
    }
}
