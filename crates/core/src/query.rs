// The six supported query shapes
//
// Each shape is built from validated parameters only. `to_sql` renders the
// Postgres template for it; the in-memory backend evaluates the same value
// directly, so both backends share one definition of what a request means.

use crate::sql::{SqlBuilder, SqlQuery};
use crate::validation::{
    key_filters, page_length, KeyFilter, Pagination, QueryParams, SortOrder, ValidationError,
};

/// Relation holding processed events.
pub const EVENTS_TABLE: &str = "processedevents";

/// Selected columns, cast to the types `Event` decodes from.
const EVENT_COLUMNS: &str =
    "id::BIGINT AS id, event_id::BIGINT AS event_id, keys::TEXT[] AS keys, data::TEXT[] AS data";

/// A validated request for events of a single `event_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventQuery {
    /// Most recent event.
    Latest { event_id: i64 },
    /// Page of events in insertion order.
    List { event_id: i64, page: Pagination },
    /// Events after a cursor id, in insertion order.
    ListFrom {
        event_id: i64,
        cursor: i64,
        page_length: i64,
    },
    /// Most recent event matching every keyed filter.
    LatestWithKeys {
        event_id: i64,
        filters: Vec<KeyFilter>,
    },
    /// Page of events sorted by one key position.
    OrderedByKey {
        event_id: i64,
        key_idx: i32,
        order: SortOrder,
        page: Pagination,
    },
    /// Page of events sorted by one data position, optionally one per
    /// distinct value of `keys[unique_key]`.
    OrderedByData {
        event_id: i64,
        data_idx: i32,
        order: SortOrder,
        page: Pagination,
        unique_key: Option<i32>,
    },
}

impl EventQuery {
    // ============================================
    // Construction from request parameters
    // ============================================

    pub fn latest(params: &QueryParams) -> Result<Self, ValidationError> {
        Ok(Self::Latest {
            event_id: params.require_i64("eventId")?,
        })
    }

    pub fn list(params: &QueryParams) -> Result<Self, ValidationError> {
        Ok(Self::List {
            event_id: params.require_i64("eventId")?,
            page: Pagination::from_params(params),
        })
    }

    pub fn list_from(params: &QueryParams) -> Result<Self, ValidationError> {
        let event_id = params.require_i64("eventId")?;
        let cursor = params.require_i64("cursor")?;
        Ok(Self::ListFrom {
            event_id,
            cursor,
            page_length: page_length(params.get("pageLength")),
        })
    }

    pub fn latest_with_keys(params: &QueryParams) -> Result<Self, ValidationError> {
        let event_id = params.require_i64("eventId")?;
        let filters = key_filters(params)?;
        Ok(Self::LatestWithKeys { event_id, filters })
    }

    pub fn ordered_by_key(params: &QueryParams) -> Result<Self, ValidationError> {
        let event_id = params.require_i64("eventId")?;
        let key_idx = params.require_index("keyIdx")?;
        Ok(Self::OrderedByKey {
            event_id,
            key_idx,
            order: SortOrder::parse(params.get("order")),
            page: Pagination::from_params(params),
        })
    }

    pub fn ordered_by_data(params: &QueryParams) -> Result<Self, ValidationError> {
        let event_id = params.require_i64("eventId")?;
        let data_idx = params.require_index("dataIdx")?;
        let order = SortOrder::parse(params.get("order"));
        let page = Pagination::from_params(params);
        let unique_key = params.optional_index("uniqueKey")?;
        Ok(Self::OrderedByData {
            event_id,
            data_idx,
            order,
            page,
            unique_key,
        })
    }

    // ============================================
    // Accessors
    // ============================================

    pub fn event_id(&self) -> i64 {
        match self {
            Self::Latest { event_id }
            | Self::List { event_id, .. }
            | Self::ListFrom { event_id, .. }
            | Self::LatestWithKeys { event_id, .. }
            | Self::OrderedByKey { event_id, .. }
            | Self::OrderedByData { event_id, .. } => *event_id,
        }
    }

    /// Whether the query yields at most one row.
    pub fn is_single_row(&self) -> bool {
        matches!(self, Self::Latest { .. } | Self::LatestWithKeys { .. })
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Latest { .. } => "latest",
            Self::List { .. } => "list",
            Self::ListFrom { .. } => "list_from",
            Self::LatestWithKeys { .. } => "latest_with_keys",
            Self::OrderedByKey { .. } => "ordered_by_key",
            Self::OrderedByData { .. } => "ordered_by_data",
        }
    }

    // ============================================
    // SQL rendering
    // ============================================

    pub fn to_sql(&self) -> SqlQuery {
        let mut q = SqlBuilder::default();
        let event_id = q.bind_bigint(self.event_id());

        match self {
            Self::Latest { .. } => {
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id} \
                     ORDER BY id DESC LIMIT 1"
                ));
            }
            Self::List { page, .. } => {
                let limit = q.bind_bigint(page.page_length);
                let offset = q.bind_bigint(page.offset());
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id} \
                     ORDER BY id ASC LIMIT {limit} OFFSET {offset}"
                ));
            }
            Self::ListFrom {
                cursor,
                page_length,
                ..
            } => {
                let cursor = q.bind_bigint(*cursor);
                let limit = q.bind_bigint(*page_length);
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id} \
                     AND id > {cursor} ORDER BY id ASC LIMIT {limit}"
                ));
            }
            Self::LatestWithKeys { filters, .. } => {
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id}"
                ));
                for filter in filters {
                    let idx = q.bind_index(filter.idx);
                    let value = q.bind_text(filter.value.as_str());
                    q.push(format!(" AND keys[{idx}] = {value}"));
                }
                q.push(" ORDER BY id DESC LIMIT 1");
            }
            Self::OrderedByKey {
                key_idx,
                order,
                page,
                ..
            } => {
                let key = q.bind_index(*key_idx);
                let limit = q.bind_bigint(page.page_length);
                let offset = q.bind_bigint(page.offset());
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id} \
                     ORDER BY keys[{key}] {}, id ASC LIMIT {limit} OFFSET {offset}",
                    order.as_sql()
                ));
            }
            Self::OrderedByData {
                data_idx,
                order,
                page,
                unique_key: None,
                ..
            } => {
                let datum = q.bind_index(*data_idx);
                let limit = q.bind_bigint(page.page_length);
                let offset = q.bind_bigint(page.offset());
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM {EVENTS_TABLE} WHERE event_id = {event_id} \
                     ORDER BY data[{datum}] {}, id ASC LIMIT {limit} OFFSET {offset}",
                    order.as_sql()
                ));
            }
            Self::OrderedByData {
                data_idx,
                order,
                page,
                unique_key: Some(unique_key),
                ..
            } => {
                // DISTINCT ON must lead with the key, so the representative per
                // key is chosen in the subquery and the page is sorted outside.
                let datum = q.bind_index(*data_idx);
                let key = q.bind_index(*unique_key);
                let limit = q.bind_bigint(page.page_length);
                let offset = q.bind_bigint(page.offset());
                let dir = order.as_sql();
                q.push(format!(
                    "SELECT {EVENT_COLUMNS} FROM (\
                     SELECT DISTINCT ON (keys[{key}]) * FROM {EVENTS_TABLE} \
                     WHERE event_id = {event_id} \
                     ORDER BY keys[{key}], data[{datum}] {dir}, id ASC\
                     ) AS uniq \
                     ORDER BY data[{datum}] {dir}, keys[{key}] ASC LIMIT {limit} OFFSET {offset}"
                ));
            }
        }

        q.build()
    }
}
