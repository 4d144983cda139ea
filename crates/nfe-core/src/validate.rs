//! Field validation for inbound requests.
//!
//! Every rule is evaluated in a single pass over the payload; nothing
//! short-circuits, so the caller always sees the complete violation list in
//! rule order. For array fields the rules run rule-major: a rule is applied
//! to every element before the next rule runs, and the violation path
//! carries the element index (`produtos[1].ncm`).
//!
//! Presence and format checks both live here. A missing `cliente` or
//! `pedido` object fails every rule addressing its leaves; a missing or
//! empty `produtos` array fails only the array rule itself.

use crate::types::{CancelRequest, Cliente, IssuanceRequest, Pedido, Produto, Violation};

/// Validates an issuance request against the full provider rule set.
///
/// Returns violations in rule order; an empty vector means the request is
/// admissible and may be dispatched to the provider.
pub fn validate_issuance(request: &IssuanceRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    check(
        &mut violations,
        "ID",
        positive_int(request.id.as_deref()),
        "ID é obrigatório e deve ser um número inteiro positivo",
    );
    check(
        &mut violations,
        "operacao",
        int_in_range(request.operacao, 1, 5),
        "Operação deve ser um número entre 1 e 5",
    );
    check(
        &mut violations,
        "natureza_operacao",
        non_empty(request.natureza_operacao.as_deref()),
        "Natureza da operação é obrigatória",
    );
    check(
        &mut violations,
        "modelo",
        int_in_range(request.modelo, 1, 3),
        "Modelo deve ser um número entre 1 e 3",
    );
    check(
        &mut violations,
        "finalidade",
        int_in_range(request.finalidade, 1, 4),
        "Finalidade deve ser um número entre 1 e 4",
    );
    check(
        &mut violations,
        "ambiente",
        int_in_range(request.ambiente, 1, 2),
        "Ambiente deve ser 1 (Produção) ou 2 (Homologação)",
    );

    let fallback_cliente = Cliente::default();
    let cliente = request.cliente.as_ref().unwrap_or(&fallback_cliente);
    check(
        &mut violations,
        "cliente.cpf",
        length_in_range(cliente.cpf.as_deref(), 11, 14),
        "CPF inválido",
    );
    check(
        &mut violations,
        "cliente.nome_completo",
        non_empty(cliente.nome_completo.as_deref()),
        "Nome do cliente é obrigatório",
    );
    check(
        &mut violations,
        "cliente.endereco",
        non_empty(cliente.endereco.as_deref()),
        "Endereço é obrigatório",
    );
    check(
        &mut violations,
        "cliente.numero",
        positive(cliente.numero),
        "Número do endereço deve ser um número inteiro positivo",
    );
    check(
        &mut violations,
        "cliente.bairro",
        non_empty(cliente.bairro.as_deref()),
        "Bairro é obrigatório",
    );
    check(
        &mut violations,
        "cliente.cidade",
        non_empty(cliente.cidade.as_deref()),
        "Cidade é obrigatória",
    );
    check(
        &mut violations,
        "cliente.uf",
        length_in_range(cliente.uf.as_deref(), 2, 2),
        "UF deve ter 2 caracteres",
    );
    check(
        &mut violations,
        "cliente.cep",
        length_in_range(cliente.cep.as_deref(), 8, 9),
        "CEP inválido",
    );
    check(
        &mut violations,
        "cliente.telefone",
        non_empty(cliente.telefone.as_deref()),
        "Telefone é obrigatório",
    );
    check(
        &mut violations,
        "cliente.email",
        email(cliente.email.as_deref()),
        "E-mail inválido",
    );

    let produtos = request.produtos.as_deref().unwrap_or_default();
    check(
        &mut violations,
        "produtos",
        !produtos.is_empty(),
        "Pelo menos um produto é necessário",
    );
    check_produtos(&mut violations, produtos);

    let fallback_pedido = Pedido::default();
    let pedido = request.pedido.as_ref().unwrap_or(&fallback_pedido);
    check(
        &mut violations,
        "pedido.pagamento",
        int_in_range(pedido.pagamento, 0, 3),
        "Pagamento deve ser um número entre 0 e 3",
    );
    check(
        &mut violations,
        "pedido.presenca",
        int_in_range(pedido.presenca, 0, 9),
        "Presença deve ser um número entre 0 e 9",
    );
    check(
        &mut violations,
        "pedido.modalidade_frete",
        int_in_range(pedido.modalidade_frete, 0, 9),
        "Modalidade de frete deve ser um número entre 0 e 9",
    );
    check(
        &mut violations,
        "pedido.frete",
        decimal_gt_zero(pedido.frete.as_deref()),
        "Frete deve ser maior que zero",
    );
    check(
        &mut violations,
        "pedido.desconto",
        decimal_gt_zero(pedido.desconto.as_deref()),
        "Desconto deve ser maior que zero",
    );
    check(
        &mut violations,
        "pedido.total",
        decimal_gt_zero(pedido.total.as_deref()),
        "Total deve ser maior que zero",
    );

    violations
}

/// Validates an invoice access key: 20 to 44 characters, nothing more.
///
/// The provider owns the full key semantics; this gate only rejects values
/// that cannot possibly address an invoice.
pub fn validate_chave(chave: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    check(
        &mut violations,
        "chave",
        length_in_range(Some(chave), 20, 44),
        "Chave de nota fiscal inválida",
    );
    violations
}

/// Validates a cancellation: the access key rule plus a non-empty reason.
pub fn validate_cancel(chave: &str, request: &CancelRequest) -> Vec<Violation> {
    let mut violations = validate_chave(chave);
    check(
        &mut violations,
        "motivo",
        non_empty(request.motivo.as_deref()),
        "Motivo é obrigatório",
    );
    violations
}

fn check_produtos(violations: &mut Vec<Violation>, produtos: &[Produto]) {
    each(violations, produtos, "nome", "Nome do produto é obrigatório", |p| {
        non_empty(p.nome.as_deref())
    });
    each(violations, produtos, "codigo", "Código do produto é obrigatório", |p| {
        non_empty(p.codigo.as_deref())
    });
    each(violations, produtos, "ncm", "NCM deve ter 8 caracteres", |p| {
        length_at_least(p.ncm.as_deref(), 8)
    });
    each(violations, produtos, "cest", "CEST deve ter 7 caracteres", |p| {
        length_at_least(p.cest.as_deref(), 7)
    });
    each(
        violations,
        produtos,
        "quantidade",
        "Quantidade do produto deve ser maior que zero",
        |p| decimal_gt_zero(p.quantidade.as_deref()),
    );
    each(violations, produtos, "unidade", "Unidade do produto é obrigatória", |p| {
        non_empty(p.unidade.as_deref())
    });
    each(
        violations,
        produtos,
        "peso",
        "Peso do produto deve ser maior que zero",
        |p| decimal_gt_zero(p.peso.as_deref()),
    );
    each(
        violations,
        produtos,
        "origem",
        "Origem deve ser um número entre 0 e 8",
        |p| int_in_range(p.origem, 0, 8),
    );
    each(
        violations,
        produtos,
        "subtotal",
        "Subtotal do produto deve ser maior que zero",
        |p| decimal_gt_zero(p.subtotal.as_deref()),
    );
    each(
        violations,
        produtos,
        "total",
        "Total do produto deve ser maior que zero",
        |p| decimal_gt_zero(p.total.as_deref()),
    );
    each(
        violations,
        produtos,
        "classe_imposto",
        "Classe de imposto é obrigatória",
        |p| non_empty(p.classe_imposto.as_deref()),
    );
}

fn check(violations: &mut Vec<Violation>, field: &str, ok: bool, message: &str) {
    if !ok {
        violations.push(Violation::new(field, message));
    }
}

// One rule across all elements, so multi-product violations keep rule order.
fn each(
    violations: &mut Vec<Violation>,
    produtos: &[Produto],
    field: &str,
    message: &str,
    ok: impl Fn(&Produto) -> bool,
) {
    for (index, produto) in produtos.iter().enumerate() {
        if !ok(produto) {
            violations.push(Violation::new(format!("produtos[{index}].{field}"), message));
        }
    }
}

fn positive_int(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .is_some_and(|n| n > 0)
}

fn positive(value: Option<i64>) -> bool {
    value.is_some_and(|n| n > 0)
}

fn int_in_range(value: Option<i64>, min: i64, max: i64) -> bool {
    value.is_some_and(|n| (min..=max).contains(&n))
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn length_in_range(value: Option<&str>, min: usize, max: usize) -> bool {
    value.is_some_and(|v| (min..=max).contains(&v.chars().count()))
}

fn length_at_least(value: Option<&str>, min: usize) -> bool {
    value.is_some_and(|v| v.chars().count() >= min)
}

// Strict greater-than: "0", "0.00", and unparseable values all fail.
fn decimal_gt_zero(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .is_some_and(|n| n.is_finite() && n > 0.0)
}

fn email(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> IssuanceRequest {
        serde_json::from_value(json!({
            "ID": "17300",
            "url_notificacao": "https://webmaniabr.com/retorno.php",
            "operacao": 1,
            "natureza_operacao": "Venda de produção do estabelecimento",
            "modelo": 1,
            "finalidade": 1,
            "ambiente": 2,
            "cliente": {
                "cpf": "000.000.000-00",
                "nome_completo": "Nome do Cliente",
                "endereco": "Av. Brg. Faria Lima",
                "complemento": "Escritório",
                "numero": 1000,
                "bairro": "Itaim Bibi",
                "cidade": "São Paulo",
                "uf": "SP",
                "cep": "00000-000",
                "telefone": "(00) 0000-0000",
                "email": "nome@provedor.com"
            },
            "produtos": [
                {
                    "nome": "Nome do produto",
                    "codigo": "nome-do-produto",
                    "ncm": "6109.10.00",
                    "cest": "28.038.00",
                    "quantidade": 3,
                    "unidade": "UN",
                    "peso": "0.800",
                    "origem": 0,
                    "subtotal": "44.90",
                    "total": "134.70",
                    "classe_imposto": "REF2892"
                }
            ],
            "pedido": {
                "pagamento": 0,
                "presenca": 2,
                "modalidade_frete": 0,
                "frete": "12.56",
                "desconto": "10.00",
                "total": "174.60"
            }
        }))
        .unwrap()
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn a_complete_request_is_admissible() {
        assert_eq!(validate_issuance(&valid_request()), Vec::new());
    }

    #[test]
    fn an_empty_request_reports_every_rule_in_order() {
        let violations = validate_issuance(&IssuanceRequest::default());
        assert_eq!(violations.len(), 23);
        assert_eq!(
            fields(&violations),
            vec![
                "ID",
                "operacao",
                "natureza_operacao",
                "modelo",
                "finalidade",
                "ambiente",
                "cliente.cpf",
                "cliente.nome_completo",
                "cliente.endereco",
                "cliente.numero",
                "cliente.bairro",
                "cliente.cidade",
                "cliente.uf",
                "cliente.cep",
                "cliente.telefone",
                "cliente.email",
                "produtos",
                "pedido.pagamento",
                "pedido.presenca",
                "pedido.modalidade_frete",
                "pedido.frete",
                "pedido.desconto",
                "pedido.total",
            ]
        );
        assert_eq!(
            violations[0].message,
            "ID é obrigatório e deve ser um número inteiro positivo"
        );
        assert_eq!(violations[16].message, "Pelo menos um produto é necessário");
    }

    #[test]
    fn a_missing_product_array_fires_only_the_array_rule() {
        let mut request = valid_request();
        request.produtos = None;
        let violations = validate_issuance(&request);
        assert_eq!(fields(&violations), vec!["produtos"]);

        request.produtos = Some(Vec::new());
        let violations = validate_issuance(&request);
        assert_eq!(fields(&violations), vec!["produtos"]);
        assert_eq!(violations[0].message, "Pelo menos um produto é necessário");
    }

    #[test]
    fn zero_amounts_are_rejected_strictly() {
        let mut request = valid_request();
        {
            let produto = &mut request.produtos.as_mut().unwrap()[0];
            produto.quantidade = Some("0".into());
            produto.subtotal = Some("0.00".into());
        }
        request.pedido.as_mut().unwrap().frete = Some("0".into());

        let violations = validate_issuance(&request);
        assert_eq!(
            fields(&violations),
            vec!["produtos[0].quantidade", "produtos[0].subtotal", "pedido.frete"]
        );
        assert_eq!(
            violations[0].message,
            "Quantidade do produto deve ser maior que zero"
        );
        assert_eq!(violations[2].message, "Frete deve ser maior que zero");
    }

    #[test]
    fn just_above_zero_is_accepted() {
        let mut request = valid_request();
        request.pedido.as_mut().unwrap().desconto = Some("0.01".into());
        assert!(validate_issuance(&request).is_empty());
    }

    #[test]
    fn unparseable_amounts_are_rejected() {
        let mut request = valid_request();
        request.produtos.as_mut().unwrap()[0].peso = Some("pesado".into());
        let violations = validate_issuance(&request);
        assert_eq!(fields(&violations), vec!["produtos[0].peso"]);
        assert_eq!(violations[0].message, "Peso do produto deve ser maior que zero");
    }

    #[test]
    fn product_violations_carry_the_element_index() {
        let mut request = valid_request();
        let mut second = request.produtos.as_ref().unwrap()[0].clone();
        second.nome = None;
        request.produtos.as_mut().unwrap().push(second);

        let violations = validate_issuance(&request);
        assert_eq!(fields(&violations), vec!["produtos[1].nome"]);
    }

    #[test]
    fn product_violations_keep_rule_order_across_elements() {
        let mut request = valid_request();
        let produtos = request.produtos.as_mut().unwrap();
        produtos[0].nome = None;
        produtos[0].codigo = None;
        let mut second = produtos[0].clone();
        second.nome = None;
        second.codigo = None;
        produtos.push(second);

        let violations = validate_issuance(&request);
        assert_eq!(
            fields(&violations),
            vec![
                "produtos[0].nome",
                "produtos[1].nome",
                "produtos[0].codigo",
                "produtos[1].codigo",
            ]
        );
    }

    #[test]
    fn a_missing_cliente_fires_every_cliente_rule() {
        let mut request = valid_request();
        request.cliente = None;
        let violations = validate_issuance(&request);
        assert_eq!(violations.len(), 10);
        assert!(violations.iter().all(|v| v.field.starts_with("cliente.")));
    }

    #[test]
    fn cpf_and_cep_are_validated_by_length_only() {
        let mut request = valid_request();
        request.cliente.as_mut().unwrap().cpf = Some("1234567890".into());
        request.cliente.as_mut().unwrap().cep = Some("1234567".into());
        let violations = validate_issuance(&request);
        assert_eq!(fields(&violations), vec!["cliente.cpf", "cliente.cep"]);
        assert_eq!(violations[0].message, "CPF inválido");
        assert_eq!(violations[1].message, "CEP inválido");

        // Punctuated and bare forms both fit the accepted lengths.
        request.cliente.as_mut().unwrap().cpf = Some("00000000000".into());
        request.cliente.as_mut().unwrap().cep = Some("00000000".into());
        assert!(validate_issuance(&request).is_empty());
    }

    #[test]
    fn uf_must_have_exactly_two_characters() {
        for bad in ["S", "SPP", ""] {
            let mut request = valid_request();
            request.cliente.as_mut().unwrap().uf = Some(bad.into());
            let violations = validate_issuance(&request);
            assert_eq!(fields(&violations), vec!["cliente.uf"], "uf = {bad:?}");
            assert_eq!(violations[0].message, "UF deve ter 2 caracteres");
        }
    }

    #[test]
    fn email_must_be_well_formed() {
        for bad in [
            "nome",
            "nome@",
            "@provedor.com",
            "nome@provedor",
            "nome@prove dor.com",
            "nome@@provedor.com",
            "nome@.com",
        ] {
            let mut request = valid_request();
            request.cliente.as_mut().unwrap().email = Some(bad.into());
            let violations = validate_issuance(&request);
            assert_eq!(fields(&violations), vec!["cliente.email"], "email = {bad:?}");
            assert_eq!(violations[0].message, "E-mail inválido");
        }
    }

    #[test]
    fn id_must_be_a_positive_integer() {
        for bad in ["0", "-5", "abc", "1.5", ""] {
            let mut request = valid_request();
            request.id = Some(bad.into());
            let violations = validate_issuance(&request);
            assert_eq!(fields(&violations), vec!["ID"], "id = {bad:?}");
        }
    }

    #[test]
    fn enum_codes_must_stay_in_provider_ranges() {
        let cases: [(&str, fn(&mut IssuanceRequest, i64)); 4] = [
            ("operacao", |r, v| r.operacao = Some(v)),
            ("modelo", |r, v| r.modelo = Some(v)),
            ("finalidade", |r, v| r.finalidade = Some(v)),
            ("ambiente", |r, v| r.ambiente = Some(v)),
        ];
        let out_of_range = [("operacao", 6), ("modelo", 4), ("finalidade", 5), ("ambiente", 3)];
        for ((field, set), (_, value)) in cases.iter().zip(out_of_range) {
            let mut request = valid_request();
            set(&mut request, value);
            assert_eq!(fields(&validate_issuance(&request)), vec![*field]);
        }

        let mut request = valid_request();
        request.produtos.as_mut().unwrap()[0].origem = Some(9);
        assert_eq!(fields(&validate_issuance(&request)), vec!["produtos[0].origem"]);

        request = valid_request();
        request.pedido.as_mut().unwrap().pagamento = Some(4);
        assert_eq!(fields(&validate_issuance(&request)), vec!["pedido.pagamento"]);
    }

    #[test]
    fn chave_length_bounds_are_inclusive() {
        assert_eq!(
            fields(&validate_chave(&"1".repeat(19))),
            vec!["chave"]
        );
        assert!(validate_chave(&"1".repeat(20)).is_empty());
        assert!(validate_chave(&"1".repeat(44)).is_empty());
        let violations = validate_chave(&"1".repeat(45));
        assert_eq!(fields(&violations), vec!["chave"]);
        assert_eq!(violations[0].message, "Chave de nota fiscal inválida");
    }

    #[test]
    fn cancel_requires_a_reason() {
        let chave = "12345678901234567890";
        let empty = CancelRequest {
            motivo: Some(String::new()),
            ..Default::default()
        };
        let violations = validate_cancel(chave, &empty);
        assert_eq!(fields(&violations), vec!["motivo"]);
        assert_eq!(violations[0].message, "Motivo é obrigatório");

        let missing = CancelRequest::default();
        assert_eq!(fields(&validate_cancel(chave, &missing)), vec!["motivo"]);

        let ok = CancelRequest {
            motivo: Some("Pedido devolvido pelo cliente".into()),
            ..Default::default()
        };
        assert!(validate_cancel(chave, &ok).is_empty());
    }

    #[test]
    fn cancel_reports_chave_before_motivo() {
        let violations = validate_cancel("curta", &CancelRequest::default());
        assert_eq!(fields(&violations), vec!["chave", "motivo"]);
    }
}
