//! WebHDFS backend: talks to the namenode's REST API (`/webhdfs/v1`).
//!
//! Only the three read operations the listing needs are implemented:
//! `GETFILESTATUS`, `LISTSTATUS` and `GETHOMEDIRECTORY`.

use super::{Entry, EntryKind, FsError, FsResult, RemoteFs};
use chrono::DateTime;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const API_PREFIX: &str = "/webhdfs/v1";

/// Connection settings for a WebHDFS namenode.
#[derive(Debug, Clone)]
pub struct WebHdfsConfig {
    /// `host:port` or a full `http(s)://host:port` URL.
    pub namenode: String,
    /// Value sent as `user.name` (simple authentication). `None` sends nothing.
    pub user: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Blocking WebHDFS client.
pub struct WebHdfsClient {
    http: Client,
    base: Url,
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileStatus {
    #[serde(default)]
    path_suffix: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    length: u64,
    permission: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    group: String,
    modification_time: i64,
}

#[derive(Debug, Deserialize)]
struct FileStatusBody {
    #[serde(rename = "FileStatus")]
    file_status: FileStatus,
}

#[derive(Debug, Deserialize)]
struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    file_status: Vec<FileStatus>,
}

#[derive(Debug, Deserialize)]
struct ListStatusBody {
    #[serde(rename = "FileStatuses")]
    file_statuses: FileStatuses,
}

#[derive(Debug, Deserialize)]
struct HomeDirBody {
    #[serde(rename = "Path")]
    path: String,
}

#[derive(Debug, Deserialize)]
struct RemoteException {
    #[serde(default)]
    exception: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RemoteExceptionBody {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

fn io_error(path: &str, message: impl ToString) -> FsError {
    FsError::Io {
        path: path.to_string(),
        message: message.to_string(),
    }
}

impl FileStatus {
    fn into_entry(self, path: &str, name: String) -> FsResult<Entry> {
        let permission = u32::from_str_radix(&self.permission, 8)
            .map_err(|_| io_error(path, format!("bad permission {:?}", self.permission)))?;
        let modification_time = DateTime::from_timestamp_millis(self.modification_time)
            .ok_or_else(|| io_error(path, "modification time out of range"))?;
        let kind = match self.kind.as_str() {
            "DIRECTORY" => EntryKind::Directory,
            _ => EntryKind::File,
        };
        Ok(Entry {
            name,
            kind,
            size: self.length,
            permission,
            owner: self.owner,
            group: self.group,
            modification_time,
        })
    }
}

fn decode<'a, T: Deserialize<'a>>(path: &str, body: &'a str) -> FsResult<T> {
    serde_json::from_str(body).map_err(|e| io_error(path, format!("malformed response: {e}")))
}

/// Parse a `GETFILESTATUS` body. The leaf name is taken from `path`, since the
/// namenode leaves `pathSuffix` empty for this operation.
pub fn parse_file_status(path: &str, body: &str) -> FsResult<Entry> {
    let parsed: FileStatusBody = decode(path, body)?;
    let name = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    parsed.file_status.into_entry(path, name)
}

/// Parse a `LISTSTATUS` body, keeping the namenode's order.
pub fn parse_list_status(path: &str, body: &str) -> FsResult<Vec<Entry>> {
    let parsed: ListStatusBody = decode(path, body)?;
    parsed
        .file_statuses
        .file_status
        .into_iter()
        .map(|status| {
            let name = status.path_suffix.clone();
            status.into_entry(path, name)
        })
        .collect()
}

/// Parse a `GETHOMEDIRECTORY` body.
pub fn parse_home_dir(body: &str) -> FsResult<String> {
    let parsed: HomeDirBody = decode("~", body)?;
    Ok(parsed.path)
}

/// Map a failed response to the error taxonomy, preferring the `RemoteException`
/// class name over the HTTP status.
pub fn error_from_response(path: &str, status: u16, body: &str) -> FsError {
    if let Ok(parsed) = serde_json::from_str::<RemoteExceptionBody>(body) {
        let exception = parsed.remote_exception;
        return match exception.exception.as_str() {
            "FileNotFoundException" => FsError::NotFound(path.to_string()),
            "AccessControlException" | "SecurityException" => {
                FsError::PermissionDenied(path.to_string())
            }
            _ => io_error(
                path,
                format!("{}: {}", exception.exception, exception.message),
            ),
        };
    }
    match status {
        404 => FsError::NotFound(path.to_string()),
        401 | 403 => FsError::PermissionDenied(path.to_string()),
        _ => io_error(path, format!("HTTP {status}")),
    }
}

/// Build the API base URL from a namenode address.
pub fn base_url(namenode: &str) -> FsResult<Url> {
    let with_scheme = if namenode.contains("://") {
        namenode.to_string()
    } else {
        format!("http://{namenode}")
    };
    let mut url =
        Url::parse(&with_scheme).map_err(|e| io_error(namenode, format!("bad namenode: {e}")))?;
    url.set_path(API_PREFIX);
    Ok(url)
}

impl WebHdfsClient {
    pub fn new(config: &WebHdfsConfig) -> FsResult<Self> {
        let base = base_url(&config.namenode)?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| io_error(&config.namenode, e))?;
        Ok(Self {
            http,
            base,
            user: config.user.clone(),
        })
    }

    /// URL for running `op` against `path`; path segments are percent-encoded.
    pub fn url_for(&self, path: &str, op: &str) -> FsResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| io_error(path, "namenode URL cannot take a path"))?;
            segments.pop_if_empty();
            let mut pushed = false;
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
                pushed = true;
            }
            if !pushed {
                segments.push("");
            }
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("op", op);
            if let Some(user) = &self.user {
                query.append_pair("user.name", user);
            }
        }
        Ok(url)
    }

    fn get(&self, path: &str, op: &str) -> FsResult<String> {
        let url = self.url_for(path, op)?;
        debug!(op, path, "webhdfs request");

        let response = self.http.get(url).send().map_err(|e| io_error(path, e))?;
        let status = response.status();
        let body = response.text().map_err(|e| io_error(path, e))?;
        if !status.is_success() {
            debug!(op, path, status = status.as_u16(), "webhdfs request failed");
            return Err(error_from_response(path, status.as_u16(), &body));
        }
        Ok(body)
    }
}

impl RemoteFs for WebHdfsClient {
    fn stat(&self, path: &str) -> FsResult<Entry> {
        let body = self.get(path, "GETFILESTATUS")?;
        parse_file_status(path, &body)
    }

    fn list_dir(&self, path: &str) -> FsResult<Vec<Entry>> {
        let body = self.get(path, "LISTSTATUS")?;
        parse_list_status(path, &body)
    }

    fn home_dir(&self) -> FsResult<String> {
        let body = self.get("/", "GETHOMEDIRECTORY")?;
        parse_home_dir(&body)
    }
}
