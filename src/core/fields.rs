// LogLens - core/fields.rs
//
// Field Reference catalogue: the queryable field paths per log source,
// shown in the "Field Reference" window. Static data; the catalogue is
// part of the stable UI contract, not derived from results.

use crate::core::model::LogSource;

/// A single referenced field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    /// Dotted path into the row, e.g. `metadata.request.cf.asOrganization`.
    pub path: &'static str,

    /// One-line description.
    pub description: &'static str,
}

/// Field paths common to every source.
const COMMON_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "timestamp",
        description: "Event time (RFC 3339)",
    },
    FieldRef {
        path: "event_message",
        description: "Rendered log line",
    },
];

const API_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.request.method",
        description: "HTTP method",
    },
    FieldRef {
        path: "metadata.request.path",
        description: "Request path",
    },
    FieldRef {
        path: "metadata.request.host",
        description: "Request host header",
    },
    FieldRef {
        path: "metadata.request.cf.asOrganization",
        description: "Client network operator",
    },
    FieldRef {
        path: "metadata.request.cf.country",
        description: "Client country code",
    },
    FieldRef {
        path: "metadata.response.status_code",
        description: "HTTP response status",
    },
    FieldRef {
        path: "metadata.response.origin_time",
        description: "Origin latency in ms",
    },
];

const DATABASE_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.parsed.error_severity",
        description: "Postgres severity (LOG, WARNING, ERROR, FATAL)",
    },
    FieldRef {
        path: "metadata.parsed.query",
        description: "Statement text, when logged",
    },
    FieldRef {
        path: "metadata.parsed.application_name",
        description: "Connecting application name",
    },
    FieldRef {
        path: "metadata.parsed.user_name",
        description: "Database role",
    },
];

const FUNCTIONS_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.function_id",
        description: "Invoked function identifier",
    },
    FieldRef {
        path: "metadata.execution_time_ms",
        description: "Invocation duration in ms",
    },
    FieldRef {
        path: "metadata.level",
        description: "Console level (log, warn, error)",
    },
];

const AUTH_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.msg",
        description: "Auth event message",
    },
    FieldRef {
        path: "metadata.status",
        description: "HTTP status of the auth request",
    },
    FieldRef {
        path: "metadata.login_method",
        description: "Credential type used",
    },
];

const STORAGE_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.req.path",
        description: "Object path",
    },
    FieldRef {
        path: "metadata.res.statusCode",
        description: "HTTP response status",
    },
    FieldRef {
        path: "metadata.responseTime",
        description: "Request duration in ms",
    },
];

const REALTIME_FIELDS: &[FieldRef] = &[
    FieldRef {
        path: "metadata.channel",
        description: "Subscribed channel name",
    },
    FieldRef {
        path: "metadata.measurements.connected",
        description: "Connected client count",
    },
];

/// All referenced field paths for a source: the common fields followed
/// by the source-specific ones.
pub fn fields_for(source: LogSource) -> impl Iterator<Item = &'static FieldRef> {
    let specific = match source {
        LogSource::Api => API_FIELDS,
        LogSource::Database => DATABASE_FIELDS,
        LogSource::Functions => FUNCTIONS_FIELDS,
        LogSource::Auth => AUTH_FIELDS,
        LogSource::Storage => STORAGE_FIELDS,
        LogSource::Realtime => REALTIME_FIELDS,
    };
    COMMON_FIELDS.iter().chain(specific.iter())
}
