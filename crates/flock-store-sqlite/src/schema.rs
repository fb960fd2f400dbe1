//! SQL schema for the Flock SQLite store.
//!
//! Executed once at connection startup; `PRAGMA user_version` records the
//! layout version.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Nullable columns hold "no value": the decoder maps `NULL` back to the
/// record layer's sentinels.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS organizations (
    organization_id INTEGER PRIMARY KEY,
    name            TEXT NOT NULL
);

-- Organisation-maintained value lists (member status, address type, ...).
CREATE TABLE IF NOT EXISTS lookups (
    lookup_id INTEGER PRIMARY KEY,
    category  TEXT NOT NULL,
    value     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS people (
    person_id               INTEGER PRIMARY KEY,
    first_name              TEXT    NOT NULL DEFAULT '',
    nick_name               TEXT    NOT NULL DEFAULT '',
    middle_name             TEXT    NOT NULL DEFAULT '',
    last_name               TEXT    NOT NULL DEFAULT '',
    suffix                  TEXT    NOT NULL DEFAULT '',
    title                   TEXT    NOT NULL DEFAULT '',
    birth_date              TEXT,             -- YYYY-MM-DD
    graduation_date         TEXT,
    gender                  TEXT    NOT NULL DEFAULT 'Unknown',
    member_status_id        INTEGER REFERENCES lookups(lookup_id),
    campus_id               INTEGER,
    staff_member            INTEGER NOT NULL DEFAULT 0,
    record_status           TEXT    NOT NULL DEFAULT 'Active',
    blob_id                 INTEGER,
    marital_status_id       INTEGER REFERENCES lookups(lookup_id),
    anniversary_date        TEXT,
    employer                TEXT    NOT NULL DEFAULT '',
    position                TEXT    NOT NULL DEFAULT '',
    medical_information     TEXT    NOT NULL DEFAULT '',
    envelope_number         INTEGER,
    contribute_individually INTEGER NOT NULL DEFAULT 0,
    print_statement         INTEGER NOT NULL DEFAULT 0,
    email_statement         INTEGER NOT NULL DEFAULT 0,
    family_id               INTEGER,
    notes                   TEXT    NOT NULL DEFAULT '',
    created_by              TEXT    NOT NULL DEFAULT '',
    date_created            TEXT    NOT NULL, -- RFC 3339 UTC
    modified_by             TEXT    NOT NULL DEFAULT '',
    date_modified           TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS addresses (
    address_id      INTEGER PRIMARY KEY,
    person_id       INTEGER NOT NULL REFERENCES people(person_id),
    address_type_id INTEGER REFERENCES lookups(lookup_id),
    street_line_1   TEXT    NOT NULL DEFAULT '',
    street_line_2   TEXT    NOT NULL DEFAULT '',
    city            TEXT    NOT NULL DEFAULT '',
    state           TEXT    NOT NULL DEFAULT '',
    postal_code     TEXT    NOT NULL DEFAULT '',
    country         TEXT    NOT NULL DEFAULT '',
    is_primary      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS phones (
    phone_id      INTEGER PRIMARY KEY,
    person_id     INTEGER NOT NULL REFERENCES people(person_id),
    phone_type_id INTEGER REFERENCES lookups(lookup_id),
    number        TEXT    NOT NULL DEFAULT '',
    extension     TEXT    NOT NULL DEFAULT '',
    unlisted      INTEGER NOT NULL DEFAULT 0,
    sms_enabled   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS emails (
    email_id    INTEGER PRIMARY KEY,
    person_id   INTEGER NOT NULL REFERENCES people(person_id),
    address     TEXT    NOT NULL DEFAULT '',
    active      INTEGER NOT NULL DEFAULT 1,
    email_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS profiles (
    profile_id        INTEGER PRIMARY KEY,
    name              TEXT    NOT NULL DEFAULT '',
    profile_type      INTEGER NOT NULL,  -- ProfileType code
    owner_id          INTEGER,
    parent_profile_id INTEGER,
    active            INTEGER NOT NULL DEFAULT 1,
    summary           TEXT    NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS profile_members (
    profile_id INTEGER NOT NULL REFERENCES profiles(profile_id),
    person_id  INTEGER NOT NULL REFERENCES people(person_id),
    PRIMARY KEY (profile_id, person_id)
);

CREATE TABLE IF NOT EXISTS categories (
    category_id         INTEGER PRIMARY KEY,
    name                TEXT    NOT NULL DEFAULT '',
    description         TEXT    NOT NULL DEFAULT '',
    allow_registrations INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS clusters (
    cluster_id        INTEGER PRIMARY KEY,
    name              TEXT    NOT NULL DEFAULT '',
    parent_cluster_id INTEGER,
    category_id       INTEGER REFERENCES categories(category_id),
    level             INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS small_groups (
    group_id     INTEGER PRIMARY KEY,
    name         TEXT    NOT NULL DEFAULT '',
    description  TEXT    NOT NULL DEFAULT '',
    leader_id    INTEGER,
    cluster_id   INTEGER REFERENCES clusters(cluster_id),
    meeting_day  TEXT    NOT NULL DEFAULT '',
    meeting_time TEXT    NOT NULL DEFAULT '',
    member_count INTEGER,
    active       INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS roles (
    role_id         INTEGER PRIMARY KEY,
    organization_id INTEGER NOT NULL REFERENCES organizations(organization_id),
    name            TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS role_members (
    role_id   INTEGER NOT NULL REFERENCES roles(role_id),
    person_id INTEGER NOT NULL,
    PRIMARY KEY (role_id, person_id)
);

-- Grants are additive; a target with no rows is denied to everyone.
CREATE TABLE IF NOT EXISTS grants (
    target_kind  TEXT    NOT NULL,   -- 'field' | 'profile'
    target_key   TEXT    NOT NULL,   -- field wire name or profile id
    subject_kind TEXT    NOT NULL,   -- 'person' | 'role'
    subject_id   INTEGER NOT NULL,
    operation    TEXT    NOT NULL,   -- 'view' | 'edit'
    PRIMARY KEY (target_kind, target_key, subject_kind, subject_id, operation)
);

CREATE TABLE IF NOT EXISTS accounts (
    username        TEXT    PRIMARY KEY COLLATE NOCASE,
    password_hash   TEXT    NOT NULL,   -- argon2 PHC string
    person_id       INTEGER NOT NULL,
    organization_id INTEGER NOT NULL REFERENCES organizations(organization_id),
    locked          INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS people_name_idx       ON people(last_name COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS addresses_person_idx  ON addresses(person_id);
CREATE INDEX IF NOT EXISTS phones_person_idx     ON phones(person_id);
CREATE INDEX IF NOT EXISTS emails_person_idx     ON emails(person_id);
CREATE INDEX IF NOT EXISTS members_person_idx    ON profile_members(person_id);
CREATE INDEX IF NOT EXISTS role_members_idx      ON role_members(person_id);

PRAGMA user_version = 1;
";
