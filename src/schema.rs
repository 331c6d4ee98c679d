//! Database schema definitions
//!
//! Table and column names live here as constants shared by the SQL dialects
//! and the tests. Each dialect renders the guarded `CREATE TABLE` batch for
//! the three tables in foreign-key dependency order: Patient before
//! Prescription before PrescribedDrug. Reversing that order would fail
//! foreign-key creation on a fresh database.

/// Patient table schema
pub mod patient {
    /// Table name
    pub const TABLE: &str = "Patient";
    /// Primary key column
    pub const ID: &str = "id";
    /// Row creation timestamp column
    pub const CREATED_AT: &str = "createdAt";
    /// Row update timestamp column
    pub const UPDATED_AT: &str = "updatedAt";
    /// Patient full name column
    pub const FULL_NAME: &str = "fullName";
    /// Date of birth column
    pub const DOB: &str = "dob";
    /// Gender column
    pub const GENDER: &str = "gender";
    /// Blood type column
    pub const BLOOD_TYPE: &str = "bloodType";
    /// Contact number column
    pub const CONTACT_NUMBER: &str = "contactNumber";
    /// Emergency contact column
    pub const EMERGENCY_CONTACT: &str = "emergencyContact";
    /// Allergies free-text column
    pub const ALLERGIES: &str = "allergies";
    /// Medical history free-text column
    pub const MEDICAL_HISTORY: &str = "medicalHistory";
}

/// Prescription table schema
pub mod prescription {
    /// Table name
    pub const TABLE: &str = "Prescription";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to the Patient table
    pub const PATIENT_ID: &str = "patientId";
    /// Prescribing doctor column
    pub const DOCTOR_ID: &str = "doctorId";
    /// Risk level column
    pub const RISK_LEVEL: &str = "riskLevel";
    /// Summary free-text column
    pub const SUMMARY: &str = "summary";
    /// Recommendations free-text column
    pub const RECOMMENDATIONS: &str = "recommendations";
    /// Row creation timestamp column
    pub const CREATED_AT: &str = "createdAt";
    /// Name of the cascade foreign-key constraint to Patient
    pub const FK_PATIENT: &str = "FK_Prescription_Patient";
}

/// PrescribedDrug table schema
pub mod prescribed_drug {
    /// Table name
    pub const TABLE: &str = "PrescribedDrug";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to the Prescription table
    pub const PRESCRIPTION_ID: &str = "prescriptionId";
    /// Drug name column
    pub const NAME: &str = "name";
    /// Dosage column
    pub const DOSAGE: &str = "dosage";
    /// Frequency column
    pub const FREQUENCY: &str = "frequency";
    /// Name of the cascade foreign-key constraint to Prescription
    pub const FK_PRESCRIPTION: &str = "FK_PrescribedDrug_Prescription";
}

/// One guarded DDL batch for a single table.
#[derive(Debug, Clone)]
pub struct SchemaStatement {
    /// Table the batch guards.
    pub table: &'static str,
    /// Complete DDL text, safe to re-execute.
    pub sql: String,
}

/// Renders the ordered create-if-absent statements for one SQL dialect.
///
/// The executor never looks inside the SQL; targeting another engine means
/// implementing this trait against that engine's catalog-introspection
/// mechanism.
pub trait SchemaDialect {
    /// Dialect name for log lines.
    fn name(&self) -> &'static str;

    /// Statements in foreign-key dependency order.
    fn statements(&self) -> Vec<SchemaStatement>;
}

/// SQL Server dialect: `sys.objects` existence guards around each
/// `CREATE TABLE`, with `PRINT` feedback for either outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl MssqlDialect {
    fn patient(self) -> String {
        format!(
            r"IF NOT EXISTS (SELECT * FROM sys.objects WHERE object_id = OBJECT_ID(N'[dbo].[{table}]') AND type in (N'U'))
BEGIN
    CREATE TABLE [dbo].[{table}] (
        [{id}] NVARCHAR(255) PRIMARY KEY,
        [{created_at}] DATETIMEOFFSET DEFAULT SYSUTCDATETIME(),
        [{updated_at}] DATETIMEOFFSET DEFAULT SYSUTCDATETIME(),
        [{full_name}] NVARCHAR(255),
        [{dob}] NVARCHAR(50),
        [{gender}] NVARCHAR(50),
        [{blood_type}] NVARCHAR(10),
        [{contact_number}] NVARCHAR(50),
        [{emergency_contact}] NVARCHAR(50),
        [{allergies}] NVARCHAR(MAX),
        [{medical_history}] NVARCHAR(MAX)
    );
    PRINT 'Table [{table}] created.';
END
ELSE
BEGIN
    PRINT 'Table [{table}] already exists.';
END",
            table = patient::TABLE,
            id = patient::ID,
            created_at = patient::CREATED_AT,
            updated_at = patient::UPDATED_AT,
            full_name = patient::FULL_NAME,
            dob = patient::DOB,
            gender = patient::GENDER,
            blood_type = patient::BLOOD_TYPE,
            contact_number = patient::CONTACT_NUMBER,
            emergency_contact = patient::EMERGENCY_CONTACT,
            allergies = patient::ALLERGIES,
            medical_history = patient::MEDICAL_HISTORY,
        )
    }

    fn prescription(self) -> String {
        format!(
            r"IF NOT EXISTS (SELECT * FROM sys.objects WHERE object_id = OBJECT_ID(N'[dbo].[{table}]') AND type in (N'U'))
BEGIN
    CREATE TABLE [dbo].[{table}] (
        [{id}] NVARCHAR(255) PRIMARY KEY,
        [{patient_id}] NVARCHAR(255) NOT NULL,
        [{doctor_id}] NVARCHAR(255),
        [{risk_level}] NVARCHAR(50),
        [{summary}] NVARCHAR(MAX),
        [{recommendations}] NVARCHAR(MAX),
        [{created_at}] DATETIMEOFFSET DEFAULT SYSUTCDATETIME(),
        CONSTRAINT {fk} FOREIGN KEY ([{patient_id}]) REFERENCES [dbo].[{parent}]([{parent_id}]) ON DELETE CASCADE
    );
    PRINT 'Table [{table}] created.';
END
ELSE
BEGIN
    PRINT 'Table [{table}] already exists.';
END",
            table = prescription::TABLE,
            id = prescription::ID,
            patient_id = prescription::PATIENT_ID,
            doctor_id = prescription::DOCTOR_ID,
            risk_level = prescription::RISK_LEVEL,
            summary = prescription::SUMMARY,
            recommendations = prescription::RECOMMENDATIONS,
            created_at = prescription::CREATED_AT,
            fk = prescription::FK_PATIENT,
            parent = patient::TABLE,
            parent_id = patient::ID,
        )
    }

    fn prescribed_drug(self) -> String {
        format!(
            r"IF NOT EXISTS (SELECT * FROM sys.objects WHERE object_id = OBJECT_ID(N'[dbo].[{table}]') AND type in (N'U'))
BEGIN
    CREATE TABLE [dbo].[{table}] (
        [{id}] NVARCHAR(255) PRIMARY KEY,
        [{prescription_id}] NVARCHAR(255) NOT NULL,
        [{name}] NVARCHAR(255) NOT NULL,
        [{dosage}] NVARCHAR(100),
        [{frequency}] NVARCHAR(100),
        CONSTRAINT {fk} FOREIGN KEY ([{prescription_id}]) REFERENCES [dbo].[{parent}]([{parent_id}]) ON DELETE CASCADE
    );
    PRINT 'Table [{table}] created.';
END
ELSE
BEGIN
    PRINT 'Table [{table}] already exists.';
END",
            table = prescribed_drug::TABLE,
            id = prescribed_drug::ID,
            prescription_id = prescribed_drug::PRESCRIPTION_ID,
            name = prescribed_drug::NAME,
            dosage = prescribed_drug::DOSAGE,
            frequency = prescribed_drug::FREQUENCY,
            fk = prescribed_drug::FK_PRESCRIPTION,
            parent = prescription::TABLE,
            parent_id = prescription::ID,
        )
    }
}

impl SchemaDialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn statements(&self) -> Vec<SchemaStatement> {
        vec![
            SchemaStatement {
                table: patient::TABLE,
                sql: self.patient(),
            },
            SchemaStatement {
                table: prescription::TABLE,
                sql: self.prescription(),
            },
            SchemaStatement {
                table: prescribed_drug::TABLE,
                sql: self.prescribed_drug(),
            },
        ]
    }
}

/// SQLite dialect: the same logical schema rendered with `CREATE TABLE IF
/// NOT EXISTS` guards, `TEXT` columns and `strftime`-based UTC defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

/// UTC timestamp default expression for SQLite columns.
const SQLITE_UTC_NOW: &str = "(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))";

impl SqliteDialect {
    fn patient(self) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (
    "{id}" TEXT PRIMARY KEY,
    "{created_at}" TEXT DEFAULT {now},
    "{updated_at}" TEXT DEFAULT {now},
    "{full_name}" TEXT,
    "{dob}" TEXT,
    "{gender}" TEXT,
    "{blood_type}" TEXT,
    "{contact_number}" TEXT,
    "{emergency_contact}" TEXT,
    "{allergies}" TEXT,
    "{medical_history}" TEXT
);"#,
            table = patient::TABLE,
            id = patient::ID,
            created_at = patient::CREATED_AT,
            updated_at = patient::UPDATED_AT,
            full_name = patient::FULL_NAME,
            dob = patient::DOB,
            gender = patient::GENDER,
            blood_type = patient::BLOOD_TYPE,
            contact_number = patient::CONTACT_NUMBER,
            emergency_contact = patient::EMERGENCY_CONTACT,
            allergies = patient::ALLERGIES,
            medical_history = patient::MEDICAL_HISTORY,
            now = SQLITE_UTC_NOW,
        )
    }

    fn prescription(self) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (
    "{id}" TEXT PRIMARY KEY,
    "{patient_id}" TEXT NOT NULL,
    "{doctor_id}" TEXT,
    "{risk_level}" TEXT,
    "{summary}" TEXT,
    "{recommendations}" TEXT,
    "{created_at}" TEXT DEFAULT {now},
    FOREIGN KEY ("{patient_id}") REFERENCES "{parent}"("{parent_id}") ON DELETE CASCADE
);"#,
            table = prescription::TABLE,
            id = prescription::ID,
            patient_id = prescription::PATIENT_ID,
            doctor_id = prescription::DOCTOR_ID,
            risk_level = prescription::RISK_LEVEL,
            summary = prescription::SUMMARY,
            recommendations = prescription::RECOMMENDATIONS,
            created_at = prescription::CREATED_AT,
            parent = patient::TABLE,
            parent_id = patient::ID,
            now = SQLITE_UTC_NOW,
        )
    }

    fn prescribed_drug(self) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (
    "{id}" TEXT PRIMARY KEY,
    "{prescription_id}" TEXT NOT NULL,
    "{name}" TEXT NOT NULL,
    "{dosage}" TEXT,
    "{frequency}" TEXT,
    FOREIGN KEY ("{prescription_id}") REFERENCES "{parent}"("{parent_id}") ON DELETE CASCADE
);"#,
            table = prescribed_drug::TABLE,
            id = prescribed_drug::ID,
            prescription_id = prescribed_drug::PRESCRIPTION_ID,
            name = prescribed_drug::NAME,
            dosage = prescribed_drug::DOSAGE,
            frequency = prescribed_drug::FREQUENCY,
            parent = prescription::TABLE,
            parent_id = prescription::ID,
        )
    }
}

impl SchemaDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn statements(&self) -> Vec<SchemaStatement> {
        vec![
            SchemaStatement {
                table: patient::TABLE,
                sql: self.patient(),
            },
            SchemaStatement {
                table: prescription::TABLE,
                sql: self.prescription(),
            },
            SchemaStatement {
                table: prescribed_drug::TABLE,
                sql: self.prescribed_drug(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mssql_statements_in_dependency_order() {
        let tables: Vec<_> = MssqlDialect
            .statements()
            .into_iter()
            .map(|s| s.table)
            .collect();
        assert_eq!(
            tables,
            vec![patient::TABLE, prescription::TABLE, prescribed_drug::TABLE]
        );
    }

    #[test]
    fn test_sqlite_statements_in_dependency_order() {
        let tables: Vec<_> = SqliteDialect
            .statements()
            .into_iter()
            .map(|s| s.table)
            .collect();
        assert_eq!(
            tables,
            vec![patient::TABLE, prescription::TABLE, prescribed_drug::TABLE]
        );
    }

    #[test]
    fn test_mssql_statements_are_guarded() {
        for statement in MssqlDialect.statements() {
            assert!(
                statement.sql.contains("IF NOT EXISTS") && statement.sql.contains("sys.objects"),
                "unguarded statement for {}",
                statement.table
            );
        }
    }

    #[test]
    fn test_sqlite_statements_are_guarded() {
        for statement in SqliteDialect.statements() {
            assert!(
                statement.sql.contains("CREATE TABLE IF NOT EXISTS"),
                "unguarded statement for {}",
                statement.table
            );
        }
    }

    #[test]
    fn test_mssql_cascade_constraints_present() {
        let statements = MssqlDialect.statements();
        assert!(statements[1].sql.contains(prescription::FK_PATIENT));
        assert!(statements[1].sql.contains("ON DELETE CASCADE"));
        assert!(statements[2].sql.contains(prescribed_drug::FK_PRESCRIPTION));
        assert!(statements[2].sql.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_sqlite_cascade_constraints_present() {
        let statements = SqliteDialect.statements();
        assert!(statements[1].sql.contains("ON DELETE CASCADE"));
        assert!(statements[2].sql.contains("ON DELETE CASCADE"));
    }
}
