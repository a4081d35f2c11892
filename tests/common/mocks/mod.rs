//! Mock implementations for external dependencies
//! This module contains mock objects used for testing

use std::sync::Mutex;

use askbot::Error;
use askbot::utils::reply::ReplySink;
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub Sink {}

    #[async_trait]
    impl ReplySink for Sink {
        async fn edit_primary(&self, content: &str) -> Result<(), Error>;
        async fn append(&self, content: &str) -> Result<(), Error>;
        async fn send_file(&self, content: &str, file_name: &str, data: Vec<u8>) -> Result<(), Error>;
    }
}

/// One call made against a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Primary(String),
    FollowUp(String),
    File {
        content: String,
        file_name: String,
        data: Vec<u8>,
    },
}

/// Reply sink that records everything sent to it.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) -> Result<(), Error> {
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn edit_primary(&self, content: &str) -> Result<(), Error> {
        self.record(Sent::Primary(content.to_string()))
    }

    async fn append(&self, content: &str) -> Result<(), Error> {
        self.record(Sent::FollowUp(content.to_string()))
    }

    async fn send_file(&self, content: &str, file_name: &str, data: Vec<u8>) -> Result<(), Error> {
        self.record(Sent::File {
            content: content.to_string(),
            file_name: file_name.to_string(),
            data,
        })
    }
}
