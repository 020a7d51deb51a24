use crate::api::client::ApiClient;
use crate::core::error::{ApiError, ApiResult};
use crate::models::catalog::Room;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, warn};

/// The three lists behind the admin landing page; each loads on its own
#[derive(Debug)]
pub struct AdminOverview {
    pub departments: ApiResult<Value>,
    pub faculty: ApiResult<Value>,
    pub rooms: ApiResult<Vec<Room>>,
}

impl AdminOverview {
    /// Any of the loads came back as a 401
    pub fn signed_out(&self) -> bool {
        matches!(self.departments, Ok(None))
            || matches!(self.faculty, Ok(None))
            || matches!(self.rooms, Ok(None))
    }

    pub fn errors(&self) -> Vec<(&'static str, &ApiError)> {
        let mut errors = Vec::new();
        if let Err(e) = &self.departments {
            errors.push(("departments", e));
        }
        if let Err(e) = &self.faculty {
            errors.push(("faculty", e));
        }
        if let Err(e) = &self.rooms {
            errors.push(("rooms", e));
        }
        errors
    }
}

/// Issue the overview loads concurrently and wait for all of them
pub async fn load_admin_overview(client: &ApiClient) -> AdminOverview {
    let (departments, faculty, rooms) =
        tokio::join!(client.departments(), client.faculty(), client.rooms());

    let overview = AdminOverview {
        departments,
        faculty,
        rooms,
    };

    for (list, error) in overview.errors() {
        warn!(list = list, error = %error, "Overview list failed to load");
    }

    overview
}

/// Await a create/update, then reload the list it affects
///
/// The reload is not started until the mutation has succeeded. A failed
/// mutation returns its error and the list is left as it was; a 401 from
/// either step resolves to `Ok(None)`.
pub async fn mutate_then_reload<T, U, M, R>(mutation: M, reload: R) -> ApiResult<(T, U)>
where
    M: Future<Output = ApiResult<T>>,
    R: Future<Output = ApiResult<U>>,
{
    let Some(outcome) = mutation.await? else {
        debug!("Mutation hit an invalidated session, skipping reload");
        return Ok(None);
    };

    Ok(reload.await?.map(|list| (outcome, list)))
}
