// src/codec.rs

//! Typed JSON edges for byte payloads.
//!
//! A `Deliverer<Bytes>` moves opaque byte buffers. The helpers here let both
//! ends agree on a serde type instead: values are encoded with `serde_json`
//! on the way in and decoded on the way out. The deliverer itself never looks
//! inside the bytes.

use std::future::Future;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Receiver, Result, Sender};

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

impl Sender<Bytes, Bytes> {
    /// Encode `value` as JSON and [`send_to`](Self::send_to) it.
    pub fn send_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        // ---
        let bytes = encode(value)?;
        self.send_to(bytes)
    }

    /// Encode `req` as JSON, [`sync_send_to`](Self::sync_send_to) it, and
    /// decode the handler's reply as `Resp`.
    pub async fn sync_send_json<Req, Resp>(&self, req: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        // ---
        let bytes = encode(req)?;
        let reply = self.sync_send_to(bytes).await?;
        Ok(serde_json::from_slice(&reply)?)
    }
}

impl Receiver<Bytes, Bytes> {
    /// [`to_receive`](Self::to_receive) the next value and decode it as `T`.
    ///
    /// A value that fails to decode is consumed and reported as
    /// [`Error::Serialization`](crate::Error::Serialization).
    pub async fn to_receive_json<T: DeserializeOwned>(&self) -> Result<T> {
        // ---
        let bytes = self.to_receive().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Register a typed sync handler.
    ///
    /// Requests are decoded as `Req` before `handler` runs; its `Resp` is
    /// encoded as the reply. Decode failures never reach the handler and are
    /// returned to the sync caller.
    pub fn to_sync_receive_json<Req, Resp, F, Fut>(&self, handler: F)
    where
        Req: DeserializeOwned + Send + 'static,
        Resp: Serialize + Send + 'static,
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Resp>> + Send + 'static,
    {
        // ---
        self.to_sync_receive(move |bytes: Bytes| {
            // Decode before the await so the handler runs only on valid input
            let call = serde_json::from_slice::<Req>(&bytes).map(&handler);
            async move {
                let resp = call?.await?;
                encode(&resp)
            }
        });
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::{Deliverer, Error};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Reading {
        sensor: String,
        value: f64,
    }

    #[tokio::test]
    async fn test_json_async_delivery() {
        // ---
        let deliverer: Deliverer<Bytes> = Deliverer::new();
        let sender = deliverer.new_sender("readings").unwrap();
        let receiver = deliverer.new_receiver("readings").unwrap();

        let reading = Reading {
            sensor: "t1".into(),
            value: 21.5,
        };
        sender.send_json(&reading).unwrap();

        let got: Reading = receiver.to_receive_json().await.unwrap();
        assert_eq!(got, reading);
    }

    #[tokio::test]
    async fn test_json_sync_call() {
        // ---
        let deliverer: Deliverer<Bytes> = Deliverer::new();
        let sender = deliverer.new_sender("sum").unwrap();
        let receiver = deliverer.new_receiver("sum").unwrap();

        receiver.to_sync_receive_json(|pair: (i32, i32)| async move { Ok(pair.0 + pair.1) });

        let sum: i32 = sender.sync_send_json(&(2, 3)).await.unwrap();
        assert_eq!(sum, 5);
    }

    #[tokio::test]
    async fn test_json_bad_request_skips_handler() {
        // ---
        let deliverer: Deliverer<Bytes> = Deliverer::new();
        let sender = deliverer.new_sender("strict").unwrap();
        let receiver = deliverer.new_receiver("strict").unwrap();

        receiver.to_sync_receive_json(|_: Reading| async move {
            Err::<(), _>(Error::Handler("must not run".into()))
        });

        let res: Result<()> = sender.sync_send_json("not a reading").await;
        assert!(matches!(res, Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_json_undecodable_value() {
        // ---
        let deliverer: Deliverer<Bytes> = Deliverer::new();
        let sender = deliverer.new_sender("raw").unwrap();
        let receiver = deliverer.new_receiver("raw").unwrap();

        sender.send_to(Bytes::from_static(b"\xff")).unwrap();
        let res: Result<Reading> = receiver.to_receive_json().await;
        assert!(matches!(res, Err(Error::Serialization(_))));
    }
}
