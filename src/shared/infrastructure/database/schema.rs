// Idempotent schema. Each event-sourced aggregate type owns an event table and a projection
// table; `event_streams` holds the version counter every append compares and swaps.

pub const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS event_streams (
        stream_id TEXT PRIMARY KEY,
        aggregate_type TEXT NOT NULL,
        version INTEGER NOT NULL CHECK (version >= 0),
        updated_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS work_log_entry_events (
        stream_id TEXT NOT NULL,
        sequence_number INTEGER NOT NULL CHECK (sequence_number >= 1),
        event_type TEXT NOT NULL,
        payload TEXT NOT NULL,
        occurred_at INTEGER NOT NULL,
        PRIMARY KEY (stream_id, sequence_number)
    )",
    "CREATE TABLE IF NOT EXISTS absence_events (
        stream_id TEXT NOT NULL,
        sequence_number INTEGER NOT NULL CHECK (sequence_number >= 1),
        event_type TEXT NOT NULL,
        payload TEXT NOT NULL,
        occurred_at INTEGER NOT NULL,
        PRIMARY KEY (stream_id, sequence_number)
    )",
    "CREATE TABLE IF NOT EXISTS monthly_approval_events (
        stream_id TEXT NOT NULL,
        sequence_number INTEGER NOT NULL CHECK (sequence_number >= 1),
        event_type TEXT NOT NULL,
        payload TEXT NOT NULL,
        occurred_at INTEGER NOT NULL,
        PRIMARY KEY (stream_id, sequence_number)
    )",
    "CREATE TABLE IF NOT EXISTS organization_events (
        stream_id TEXT NOT NULL,
        sequence_number INTEGER NOT NULL CHECK (sequence_number >= 1),
        event_type TEXT NOT NULL,
        payload TEXT NOT NULL,
        occurred_at INTEGER NOT NULL,
        PRIMARY KEY (stream_id, sequence_number)
    )",
    "CREATE TABLE IF NOT EXISTS work_log_entries (
        id TEXT PRIMARY KEY,
        member_id TEXT NOT NULL,
        project_id TEXT NOT NULL,
        work_date TEXT NOT NULL,
        quarter_hours INTEGER NOT NULL CHECK (quarter_hours BETWEEN 1 AND 96),
        comment TEXT,
        status TEXT NOT NULL CHECK (status IN ('DRAFT', 'SUBMITTED', 'APPROVED')),
        entered_by TEXT NOT NULL,
        updated_by TEXT NOT NULL,
        updated_at INTEGER NOT NULL,
        version INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_work_log_entries_member_date
        ON work_log_entries (member_id, work_date)",
    "CREATE TABLE IF NOT EXISTS absences (
        id TEXT PRIMARY KEY,
        member_id TEXT NOT NULL,
        absence_date TEXT NOT NULL,
        quarter_hours INTEGER NOT NULL CHECK (quarter_hours BETWEEN 1 AND 96),
        absence_type TEXT NOT NULL,
        reason TEXT,
        status TEXT NOT NULL CHECK (status IN ('DRAFT', 'SUBMITTED', 'APPROVED')),
        recorded_by TEXT NOT NULL,
        updated_by TEXT NOT NULL,
        updated_at INTEGER NOT NULL,
        version INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_absences_member_date
        ON absences (member_id, absence_date)",
    "CREATE TABLE IF NOT EXISTS monthly_approvals (
        id TEXT PRIMARY KEY,
        member_id TEXT NOT NULL,
        fiscal_month_start TEXT NOT NULL,
        fiscal_month_end TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'SUBMITTED', 'APPROVED', 'REJECTED')),
        submitted_by TEXT,
        submitted_at INTEGER,
        reviewed_by TEXT,
        reviewed_at INTEGER,
        rejection_reason TEXT,
        work_log_entry_ids TEXT NOT NULL,
        absence_ids TEXT NOT NULL,
        version INTEGER NOT NULL,
        UNIQUE (member_id, fiscal_month_start, fiscal_month_end)
    )",
    "CREATE TABLE IF NOT EXISTS organizations (
        id TEXT PRIMARY KEY,
        tenant_id TEXT NOT NULL,
        parent_id TEXT,
        code TEXT NOT NULL,
        name TEXT NOT NULL,
        level INTEGER NOT NULL CHECK (level BETWEEN 1 AND 6),
        is_active INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        version INTEGER NOT NULL,
        UNIQUE (tenant_id, code)
    )",
    "CREATE TABLE IF NOT EXISTS daily_rejection_logs (
        member_id TEXT NOT NULL,
        work_date TEXT NOT NULL,
        rejected_by TEXT NOT NULL,
        rejection_reason TEXT NOT NULL,
        affected_entry_ids TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        PRIMARY KEY (member_id, work_date)
    )",
    "CREATE TABLE IF NOT EXISTS day_notice_sequences (
        member_id TEXT NOT NULL,
        work_date TEXT NOT NULL,
        sequence INTEGER NOT NULL,
        PRIMARY KEY (member_id, work_date)
    )",
    "CREATE TABLE IF NOT EXISTS members (
        id TEXT PRIMARY KEY,
        tenant_id TEXT NOT NULL,
        organization_id TEXT,
        email TEXT NOT NULL,
        display_name TEXT NOT NULL,
        manager_id TEXT,
        is_active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE INDEX IF NOT EXISTS idx_members_manager ON members (manager_id)",
];
