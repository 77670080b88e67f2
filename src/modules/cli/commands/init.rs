//! Init command implementation

use clap::Args;
use ormlet_core::OrmError;
use ormlet_types::Provider;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const SAMPLE_TEMPLATES_XML: &str = r#"<?xml version="1.0"?>
<SqlTemplates xmlns="urn:ormlet:sql-templates">
  <Inserts>
    <Statement name="addUser">INSERT INTO users (user_name, user_mail) VALUES ({0}, {1})</Statement>
  </Inserts>
  <Selects>
    <Statement name="userById">SELECT * FROM users WHERE user_id = {0}</Statement>
    <Statement name="allUsers">SELECT * FROM users</Statement>
  </Selects>
  <Updates>
    <Statement name="renameUser">UPDATE users SET user_name = {0} WHERE user_id = {1}</Statement>
  </Updates>
  <Deletes>
    <Statement name="userById">DELETE FROM users WHERE user_id = {0}</Statement>
  </Deletes>
  <ProviderSpecific>
    <Select name="getlastinsertid" provider="sqlite">SELECT last_insert_rowid()</Select>
    <Select name="getlastinsertid" provider="mysql">SELECT LAST_INSERT_ID()</Select>
    <Select name="getlastinsertid" provider="postgres">SELECT lastval()</Select>
    <Select name="getlastinsertid" provider="mssql">SELECT SCOPE_IDENTITY()</Select>
  </ProviderSpecific>
</SqlTemplates>
"#;

const SAMPLE_MAPPINGS_XML: &str = r#"<?xml version="1.0"?>
<TableMappings xmlns="urn:ormlet:table-mappings">
  <Table name="Users">
    <Map property="Id" column="user_id"/>
    <Map property="Name" column="user_name"/>
    <Map property="Mail" column="user_mail"/>
  </Table>
</TableMappings>
"#;

const TEMPLATES_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="urn:ormlet:sql-templates"
           xmlns="urn:ormlet:sql-templates"
           elementFormDefault="qualified">
  <xs:element name="SqlTemplates">
    <xs:complexType>
      <xs:all>
        <xs:element ref="Inserts" minOccurs="0"/>
        <xs:element ref="Selects" minOccurs="0"/>
        <xs:element ref="Updates" minOccurs="0"/>
        <xs:element ref="Deletes" minOccurs="0"/>
        <xs:element ref="ProviderSpecific" minOccurs="0"/>
      </xs:all>
    </xs:complexType>
  </xs:element>
  <xs:element name="Inserts">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Statement" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Selects">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Statement" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Updates">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Statement" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Deletes">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Statement" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Statement">
    <xs:complexType>
      <xs:simpleContent>
        <xs:extension base="xs:string">
          <xs:attribute name="name" type="xs:string" use="required"/>
        </xs:extension>
      </xs:simpleContent>
    </xs:complexType>
  </xs:element>
  <xs:element name="ProviderSpecific">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Select" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Select">
    <xs:complexType>
      <xs:simpleContent>
        <xs:extension base="xs:string">
          <xs:attribute name="name" type="xs:string" use="required"/>
          <xs:attribute name="provider" type="xs:string" use="required"/>
        </xs:extension>
      </xs:simpleContent>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;

const MAPPINGS_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="urn:ormlet:table-mappings"
           xmlns="urn:ormlet:table-mappings"
           elementFormDefault="qualified">
  <xs:element name="TableMappings">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Table" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:element name="Table">
    <xs:complexType>
      <xs:sequence>
        <xs:element ref="Map" minOccurs="0" maxOccurs="unbounded"/>
      </xs:sequence>
      <xs:attribute name="name" type="xs:string" use="required"/>
    </xs:complexType>
  </xs:element>
  <xs:element name="Map">
    <xs:complexType>
      <xs:attribute name="property" type="xs:string" use="required"/>
      <xs:attribute name="column" type="xs:string" use="required"/>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;

/// Init command arguments
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Project name
    #[arg(default_value = "my-app")]
    pub name: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Database provider
    #[arg(short = 'd', long, default_value = "sqlite")]
    pub provider: String,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self) -> Result<(), OrmError> {
        let provider = Provider::from_str(&self.provider).map_err(OrmError::Configuration)?;

        info!("Initializing new Ormlet project: {}", self.name);

        let output_dir = Path::new(&self.output);
        let files = [
            ("ormlet.yaml", self.generate_settings(provider)),
            (".env.example", self.generate_env_example(provider)),
            ("config/sql-templates.xml", SAMPLE_TEMPLATES_XML.to_string()),
            (
                "config/table-mappings.xml",
                SAMPLE_MAPPINGS_XML.to_string(),
            ),
            ("schemas/sql-templates.xsd", TEMPLATES_XSD.to_string()),
            ("schemas/table-mappings.xsd", MAPPINGS_XSD.to_string()),
        ];

        for (relative, content) in files {
            let path = output_dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            info!("Created: {}", path.display());
        }

        println!("\nOrmlet project '{}' initialized!", self.name);
        println!("\nNext steps:");
        println!("  1. Edit config/sql-templates.xml and config/table-mappings.xml");
        if provider == Provider::Sqlite {
            println!("  2. Run: ormlet check -f ormlet.yaml");
        } else {
            println!("  2. Copy .env.example to .env and set ORMLET_DB_PASSWORD");
            println!("  3. Run: ormlet check -f ormlet.yaml");
        }

        Ok(())
    }

    /// Generate settings file content
    fn generate_settings(&self, provider: Provider) -> String {
        let (template, password) = match provider {
            Provider::Sqlite => ("Data Source=$dbPath/$dbName", String::new()),
            Provider::Mysql => (
                "Server=localhost;Database=$dbName;Uid=app;Pwd=$dbPassword",
                "{{ env.ORMLET_DB_PASSWORD }}".to_string(),
            ),
            Provider::Postgres => (
                "Host=localhost;Database=$dbName;Username=app;Password=$dbPassword",
                "{{ env.ORMLET_DB_PASSWORD }}".to_string(),
            ),
            Provider::Mssql => (
                "Server=localhost;Database=$dbName;User Id=app;Password=$dbPassword",
                "{{ env.ORMLET_DB_PASSWORD }}".to_string(),
            ),
        };

        format!(
            r#"# Ormlet settings for {name}

dbPath: ./data
dbName: app.db
dbPassword: "{password}"
activeDbConnection: main

connections:
  main:
    template: "{template}"
    provider: {provider}
"#,
            name = self.name,
            password = password,
            template = template,
            provider = provider
        )
    }

    /// Generate .env.example content
    fn generate_env_example(&self, provider: Provider) -> String {
        match provider {
            Provider::Sqlite => "# No secrets required for the sqlite starter\n".to_string(),
            _ => "# Database password substituted into the settings file\nORMLET_DB_PASSWORD=change-me\n".to_string(),
        }
    }
}
