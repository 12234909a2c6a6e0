//! Telegram 转发跟踪器：逐文件的发送状态（发送中 / 成功 / 失败）。

use std::collections::HashMap;

use tracing::{info, warn};

use crate::internal::backend::enums::{MediaKind, RelayMediaType};
use crate::internal::backend::structs::backend_client::BackendClient;
use crate::internal::backend::structs::relay::RelayOptions;
use crate::internal::entrance::snapchat;
use crate::internal::progress::structs::snapshot::FileProgress;
use crate::states::reactive_value::ReactiveValue;

/// 单个文件的转发状态。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelayState {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

/// 文件状态是否算已完成、可以转发
/// （complete / completed / downloaded 的任意变体）。
pub fn is_relayable_status(status: &str) -> bool {
    let s = status.to_ascii_lowercase();
    s.contains("complete") || s.contains("downloaded")
}

/// 转发跟踪器：一个 (用户名, 媒体类型) 一个实例。
pub struct RelayTracker {
    client: BackendClient,
    username: String,
    kind: MediaKind,
    states: ReactiveValue<HashMap<String, RelayState>>,
}

impl RelayTracker {
    pub fn new(client: BackendClient, username: &str, kind: MediaKind) -> Self {
        Self {
            client,
            username: username.to_string(),
            kind,
            states: ReactiveValue::new(HashMap::new()),
        }
    }

    /// 逐文件的转发状态（可 watch 监听）。
    pub fn states(&self) -> ReactiveValue<HashMap<String, RelayState>> {
        self.states.clone()
    }

    fn set_state(&self, filename: &str, state: RelayState) {
        let mut map = self.states.get();
        map.insert(filename.to_string(), state);
        self.states.update(map);
    }

    /// 把进度表中已完成的文件逐个转发到 Telegram；返回成功数量。
    ///
    /// 单个文件失败不中断其余文件，原因记录在该文件的
    /// [`RelayState::Failed`] 中。
    pub async fn relay_completed(
        &self,
        files: &HashMap<String, FileProgress>,
    ) -> usize {
        let mut sent = 0;
        for (filename, fp) in files {
            if !is_relayable_status(&fp.status) {
                continue;
            }
            self.set_state(filename, RelayState::Sending);

            let media_url = match self.client.download_url(
                &self.username,
                self.kind,
                filename,
            ) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    self.set_state(filename, RelayState::Failed(e.to_string()));
                    continue;
                }
            };
            let options = RelayOptions {
                caption: None,
                original_url: Some(format!(
                    "snapchat:@{}/{}",
                    self.username, self.kind
                )),
                source: Some("snapchat".to_string()),
            };

            match snapchat::send_media_to_telegram(
                &self.client,
                &media_url,
                RelayMediaType::for_filename(filename),
                &options,
            )
            .await
            {
                Ok(_) => {
                    info!("已转发 {filename} 到 Telegram");
                    self.set_state(filename, RelayState::Sent);
                    sent += 1;
                }
                Err(e) => {
                    warn!("转发 {filename} 失败: {e}");
                    self.set_state(filename, RelayState::Failed(e.to_string()));
                }
            }
        }
        sent
    }
}
