//! Typed access to the audit document's tables
//!
//! [`Store`] maps Grist rows to domain models. Each submodule adds the
//! operations for one table family.

use std::sync::Arc;

use crate::cache::HostingLookup;
use crate::client::GristApi;

mod audits;
mod consumptions;
mod products;
mod questions;
mod recommendations;
mod responses;

pub struct Store<C: GristApi + 'static> {
    client: Arc<C>,
    hosting: HostingLookup<C>,
}

impl<C: GristApi + 'static> Store<C> {
    #[allow(dead_code)]
    pub fn new(client: Arc<C>) -> Self {
        let hosting = HostingLookup::new(Arc::clone(&client));
        Self { client, hosting }
    }

    pub fn with_lookup(client: Arc<C>, hosting: HostingLookup<C>) -> Self {
        Self { client, hosting }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Hosting mapping resolution shared by every consumption lookup
    pub fn hosting(&self) -> &HostingLookup<C> {
        &self.hosting
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small audit document shared by the store tests

    use serde_json::json;

    use crate::client::MockGristClient;
    use crate::client::models::Record;
    use crate::schema;

    pub async fn audit_document() -> MockGristClient {
        MockGristClient::new()
            .with_records(
                schema::products::TABLE,
                vec![
                    Record::new(
                        10,
                        json!({
                            "Nom": "Carnet",
                            "Startup": 4,
                            "Languages": ["L", "Rust", "TypeScript"],
                            "Outils_mutualises": ["L", "Sentry"],
                            "Outils_non_mutualises": null
                        }),
                    ),
                    Record::new(11, json!({"Nom": "Portail"})),
                ],
            )
            .await
            .with_records(
                schema::audits::TABLE,
                vec![
                    Record::new(
                        1,
                        json!({"Hash": "h-2023", "Produit": 10, "Date_comite_d_investissment": 1672531200, "Cloture": true, "Cloture_le": 1675209600}),
                    ),
                    Record::new(
                        2,
                        json!({"Hash": "h-2024", "Produit": 10, "Date_comite_d_investissment": 1704067200, "Cloture": false, "Cloture_le": 0}),
                    ),
                    Record::new(
                        3,
                        json!({"Hash": "orphan", "Produit": 99, "Date_comite_d_investissment": 1704067200}),
                    ),
                ],
            )
            .await
            .with_records(
                schema::questions::TABLE,
                vec![
                    Record::new(
                        100,
                        json!({"Categorie": "Sécurité", "Question": "HTTPS ?", "Importance": "P0", "Statut": "Validée"}),
                    ),
                    Record::new(
                        101,
                        json!({"Categorie": "Qualité", "Question": "Tests ?", "Importance": "P1", "Tooltip": "CI", "Statut": "Validée"}),
                    ),
                    Record::new(
                        102,
                        json!({"Categorie": "Sécurité", "Question": "MFA ?", "Importance": "P2", "Statut": "Validée"}),
                    ),
                    Record::new(
                        103,
                        json!({"Categorie": "Sécurité", "Question": "Brouillon", "Statut": "A valider"}),
                    ),
                ],
            )
            .await
            .with_records(
                schema::responses::TABLE,
                vec![
                    Record::new(
                        500,
                        json!({"Audit": 1, "Question": 100, "Reponse": "Non", "Pourcentage": 30, "Commentaires_Details": "partiel"}),
                    ),
                    Record::new(501, json!({"Audit": 2, "Question": 100, "Reponse": "Oui", "Pourcentage": 0})),
                    Record::new(502, json!({"Audit": 2, "Question": 101, "Reponse": null})),
                ],
            )
            .await
    }
}
