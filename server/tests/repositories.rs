//! Repository integration tests against an embedded throwaway database
//! Run: cargo test -p mercado-server --test repositories

use mercado_server::db::DbService;
use mercado_server::db::repository::{
    ClienteRepository, EmpresaRepository, NotificacionRepository, PedidoRepository,
    ProductoRepository, RepoError, VerificationCodeRepository,
};
use rust_decimal::Decimal;
use shared::models::{
    Cliente, Empresa, EstadoPedido, Notificacion, NotificacionTipo, Pedido, PedidoItem, Producto,
    ProductoUpdate, VerificationCode,
};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let service = DbService::new(&tmp.path().join("test.db").to_string_lossy())
        .await
        .expect("open db");
    (tmp, service.db)
}

fn cliente(email: &str) -> Cliente {
    Cliente {
        id: None,
        nombre: "Ana".into(),
        email: email.into(),
        password: "$argon2$fake".into(),
        verificado: false,
        created_at: now_millis(),
    }
}

fn empresa(email: &str) -> Empresa {
    Empresa {
        id: None,
        nombre: "Panadería Sol".into(),
        email: email.into(),
        password: "$argon2$fake".into(),
        descripcion: Some("Pan artesano".into()),
        logo: None,
        verificado: true,
        created_at: now_millis(),
    }
}

fn producto(empresa_id: &str, nombre: &str, precio: i64) -> Producto {
    let now = now_millis();
    Producto {
        id: None,
        nombre: nombre.into(),
        descripcion: None,
        precio: Decimal::from(precio),
        imagen: None,
        activo: true,
        empresa: empresa_id.into(),
        empresa_nombre: "Panadería Sol".into(),
        created_at: now,
        updated_at: now,
    }
}

fn pedido(cliente_id: &str, empresa_id: &str, producto_id: &str, total: i64) -> Pedido {
    let now = now_millis();
    Pedido {
        id: None,
        cliente: cliente_id.into(),
        cliente_nombre: "Ana".into(),
        empresa: empresa_id.into(),
        items: vec![PedidoItem {
            producto: producto_id.into(),
            nombre: "Pan".into(),
            cantidad: 1,
            precio: Decimal::from(total),
        }],
        total: Decimal::from(total),
        estado: EstadoPedido::Pendiente,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn cliente_create_and_lookup() {
    let (_tmp, db) = test_db().await;
    let repo = ClienteRepository::new(db);

    let created = repo.create(cliente("ana@mail.com")).await.expect("create");
    let id = created.id.clone().expect("id assigned");
    assert!(id.starts_with("cliente:"));

    let by_email = repo
        .find_by_email("ana@mail.com")
        .await
        .expect("query")
        .expect("found");
    assert_eq!(by_email.id, created.id);
    assert!(!by_email.verificado);

    repo.mark_verificado("ana@mail.com").await.expect("verify");
    let fresh = repo.find_by_id(&id).await.expect("query").expect("found");
    assert!(fresh.verificado);
}

#[tokio::test]
async fn cliente_email_is_unique() {
    let (_tmp, db) = test_db().await;
    let repo = ClienteRepository::new(db);

    repo.create(cliente("dup@mail.com")).await.expect("first");
    let err = repo.create(cliente("dup@mail.com")).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");
}

#[tokio::test]
async fn empresa_listing_only_shows_verified() {
    let (_tmp, db) = test_db().await;
    let repo = EmpresaRepository::new(db);

    repo.create(empresa("sol@mail.com")).await.expect("create");
    let mut unverified = empresa("luna@mail.com");
    unverified.verificado = false;
    repo.create(unverified).await.expect("create");

    let listed = repo.find_all_verified().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "sol@mail.com");
}

#[tokio::test]
async fn producto_crud_and_soft_delete() {
    let (_tmp, db) = test_db().await;
    let empresas = EmpresaRepository::new(db.clone());
    let repo = ProductoRepository::new(db);

    let e = empresas.create(empresa("sol@mail.com")).await.expect("empresa");
    let empresa_id = e.id.expect("id");

    let pan = repo
        .create(producto(&empresa_id, "Pan", 2))
        .await
        .expect("create");
    let pan_id = pan.id.clone().expect("id");
    repo.create(producto(&empresa_id, "Tarta", 15))
        .await
        .expect("create");

    // Listing is alphabetical and only for the given empresa
    let all = repo.find_all_active(Some(&empresa_id)).await.expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].nombre, "Pan");

    // Merge update leaves untouched fields alone
    let updated = repo
        .update(
            &pan_id,
            ProductoUpdate {
                precio: Some(Decimal::from(3)),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.precio, Decimal::from(3));
    assert_eq!(updated.nombre, "Pan");

    // Non-positive price is rejected
    let err = repo
        .update(
            &pan_id,
            ProductoUpdate {
                precio: Some(Decimal::ZERO),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // Soft delete hides the product but the record survives
    assert!(repo.soft_delete(&pan_id).await.expect("delete"));
    let listed = repo.find_all_active(Some(&empresa_id)).await.expect("list");
    assert_eq!(listed.len(), 1);
    let hidden = repo.find_by_id(&pan_id).await.expect("query").expect("kept");
    assert!(!hidden.activo);
}

#[tokio::test]
async fn producto_find_by_ids_batch() {
    let (_tmp, db) = test_db().await;
    let repo = ProductoRepository::new(db);

    let a = repo.create(producto("empresa:x", "A", 1)).await.expect("a");
    let b = repo.create(producto("empresa:x", "B", 2)).await.expect("b");
    repo.create(producto("empresa:x", "C", 3)).await.expect("c");

    let ids = vec![a.id.expect("id"), b.id.expect("id")];
    let found = repo.find_by_ids(&ids).await.expect("batch");
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn pedido_lifecycle_and_stats() {
    let (_tmp, db) = test_db().await;
    let repo = PedidoRepository::new(db);

    let p1 = repo
        .create(pedido("cliente:ana", "empresa:sol", "producto:pan", 10))
        .await
        .expect("create");
    let p1_id = p1.id.expect("id");
    repo.create(pedido("cliente:ana", "empresa:sol", "producto:pan", 25))
        .await
        .expect("create");
    repo.create(pedido("cliente:otro", "empresa:luna", "producto:x", 99))
        .await
        .expect("create");

    // Empresa sees only its own orders
    let for_sol = repo.find_by_empresa("empresa:sol", None).await.expect("list");
    assert_eq!(for_sol.len(), 2);

    // Estado filter
    let pendientes = repo
        .find_by_empresa("empresa:sol", Some(EstadoPedido::Pendiente))
        .await
        .expect("list");
    assert_eq!(pendientes.len(), 2);

    // Cliente view
    let for_ana = repo.find_by_cliente("cliente:ana").await.expect("list");
    assert_eq!(for_ana.len(), 2);

    // Advance to finalizado and check revenue accounting
    repo.update_estado(&p1_id, EstadoPedido::EnProceso)
        .await
        .expect("advance");
    let finished = repo
        .update_estado(&p1_id, EstadoPedido::Finalizado)
        .await
        .expect("finish");
    assert_eq!(finished.estado, EstadoPedido::Finalizado);

    let stats = repo.stats("empresa:sol").await.expect("stats");
    assert_eq!(stats.total_pedidos, 2);
    assert_eq!(stats.pendientes, 1);
    assert_eq!(stats.finalizados, 1);
    assert_eq!(stats.ingresos, Decimal::from(10));

    // Revenue sums the Decimal totals across every finished order
    let p4 = repo
        .create(pedido("cliente:ana", "empresa:sol", "producto:tarta", 15))
        .await
        .expect("create");
    let p4_id = p4.id.expect("id");
    repo.update_estado(&p4_id, EstadoPedido::EnProceso)
        .await
        .expect("advance");
    repo.update_estado(&p4_id, EstadoPedido::Finalizado)
        .await
        .expect("finish");

    let stats = repo.stats("empresa:sol").await.expect("stats");
    assert_eq!(stats.total_pedidos, 3);
    assert_eq!(stats.finalizados, 2);
    assert_eq!(stats.ingresos, Decimal::from(25));
}

#[tokio::test]
async fn verification_code_resend_supersedes() {
    let (_tmp, db) = test_db().await;
    let repo = VerificationCodeRepository::new(db);

    let now = now_millis();
    repo.create(VerificationCode {
        id: None,
        email: "ana@mail.com".into(),
        code: "111111".into(),
        expires_at: now + 60_000,
        used: false,
        created_at: now,
    })
    .await
    .expect("first");

    repo.invalidate_all("ana@mail.com").await.expect("invalidate");
    repo.create(VerificationCode {
        id: None,
        email: "ana@mail.com".into(),
        code: "222222".into(),
        expires_at: now + 60_000,
        used: false,
        created_at: now + 1,
    })
    .await
    .expect("second");

    let active = repo
        .find_latest_active("ana@mail.com")
        .await
        .expect("query")
        .expect("one active");
    assert_eq!(active.code, "222222");

    repo.mark_used(&active.id.expect("id")).await.expect("consume");
    assert!(
        repo.find_latest_active("ana@mail.com")
            .await
            .expect("query")
            .is_none()
    );
}

#[tokio::test]
async fn notificacion_read_tracking() {
    let (_tmp, db) = test_db().await;
    let repo = NotificacionRepository::new(db);

    for i in 0..3 {
        repo.create(Notificacion {
            id: None,
            empresa: Some("empresa:sol".into()),
            titulo: format!("Pedido {i}"),
            mensaje: "Nuevo pedido".into(),
            tipo: NotificacionTipo::NuevoPedido,
            leida: false,
            created_at: now_millis() + i,
            metadata: None,
        })
        .await
        .expect("create");
    }

    assert_eq!(repo.count_no_leidas("empresa:sol").await.expect("count"), 3);

    let listed = repo.find_by_empresa("empresa:sol").await.expect("list");
    assert_eq!(listed.len(), 3);
    // Newest first
    assert_eq!(listed[0].titulo, "Pedido 2");

    // Marking one read requires ownership
    let first_id = listed[0].id.clone().expect("id");
    assert!(
        !repo
            .mark_leida(&first_id, "empresa:luna")
            .await
            .expect("wrong owner")
    );
    assert!(repo.mark_leida(&first_id, "empresa:sol").await.expect("owner"));
    assert_eq!(repo.count_no_leidas("empresa:sol").await.expect("count"), 2);

    repo.mark_all_leidas("empresa:sol").await.expect("mark all");
    assert_eq!(repo.count_no_leidas("empresa:sol").await.expect("count"), 0);
}
