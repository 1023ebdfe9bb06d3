/*
Copyright 2020 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! UDP fan-out transport: sends a batch of framed sentences to every
//! configured client, spawning one worker thread per destination so a
//! slow or unreachable client can't hold up delivery to the others.

use std::net::UdpSocket;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Client;

/// Delay between consecutive datagrams sent to the same client.
const SENTENCE_SEND_DELAY: Duration = Duration::from_millis(50);

/// Sends NMEA sentences to a fixed set of UDP destinations.
pub struct UdpStream {
    clients: Vec<Client>,
}

impl UdpStream {
    pub fn new(clients: Vec<Client>) -> Self {
        UdpStream { clients }
    }

    /// Sends every sentence in `sentences` to every configured client. Each
    /// client is handed its own worker thread and its own socket; a send
    /// error on one client is logged and does not stop delivery to the
    /// others. Blocks until every worker has finished.
    pub fn send(&self, sentences: &[String]) {
        let sentences = Arc::new(sentences.to_vec());
        let workers: Vec<_> = self
            .clients
            .iter()
            .copied()
            .map(|client| {
                let sentences = Arc::clone(&sentences);
                thread::spawn(move || send_to_client(client, &sentences))
            })
            .collect();
        for worker in workers {
            let _ = worker.join();
        }
    }
}

/// One client's worker body: bind a dedicated socket, send every sentence
/// to it in order, pacing each send by [`SENTENCE_SEND_DELAY`].
fn send_to_client(client: Client, sentences: &[String]) {
    let socket = match UdpSocket::bind("0.0.0.0:0") {
        Ok(s) => s,
        Err(err) => {
            warn!("failed to bind UDP socket for {}:{}: {}", client.host, client.port, err);
            return;
        }
    };
    for sentence in sentences {
        match socket.send_to(sentence.as_bytes(), (client.host, client.port)) {
            Ok(_) => debug!("sent {} bytes to {}:{}", sentence.len(), client.host, client.port),
            Err(err) => warn!("failed to send to {}:{}: {}", client.host, client.port, err),
        }
        thread::sleep(SENTENCE_SEND_DELAY);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_send_delivers_to_loopback_listener() {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        listener.set_read_timeout(Some(Duration::from_secs(1))).unwrap();
        let port = listener.local_addr().unwrap().port();

        let stream = UdpStream::new(vec![Client { host: Ipv4Addr::LOCALHOST, port }]);
        stream.send(&["!AIVDM,1,1,,A,133m@ogP00PD;88MD5MTDww@0D7k,0*44\r\n".to_string()]);

        let mut buf = [0u8; 256];
        let (n, _) = listener.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"!AIVDM,1,1,,A,133m@ogP00PD;88MD5MTDww@0D7k,0*44\r\n");
    }
}
