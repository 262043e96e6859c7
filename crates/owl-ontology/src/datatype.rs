//! Ontology datatype to protobuf type mapping

/// XML Schema datatype namespace, abbreviated as `xsd:`
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Map an ontology datatype identifier to a protobuf scalar or well-known type.
///
/// Absolute XML Schema IRIs are looked up in their `xsd:` form.
/// Identifiers that are not in the table are returned unchanged; they are
/// assumed to already name a valid message type.
pub fn proto_type(datatype: &str) -> String {
    let expanded;
    let datatype = match datatype.strip_prefix(XSD_NAMESPACE) {
        Some(local) => {
            expanded = format!("xsd:{local}");
            expanded.as_str()
        }
        None => datatype,
    };

    let mapped = match datatype {
        "xsd:boolean" => "bool",
        "xsd:String"
        | "xsd:string"
        | "xsd:de.fraunhofer.aisec.cpg.graph.Node"
        | "xsd:de.fraunhofer.aisec.cpg.graph.statements.expressions.CallExpression"
        | "xsd:de.fraunhofer.aisec.cpg.graph.statements.expressions.Expression"
        | "xsd:de.fraunhofer.aisec.cpg.graph.declarations.FunctionDeclaration"
        | "http://graph.clouditor.io/classes/resourceId" => "string",
        "xsd:listString"
        | "xsd:java.util.ArrayList<String>"
        | "java.util.List<de.fraunhofer.aisec.cpg.graph.declarations.TranslationUnitDeclaration>"
        | "java.util.List<de.fraunhofer.aisec.cpg.graph.statements.expressions.CallExpression>"
        | "xsd:java.util.List<de.fraunhofer.aisec.cpg.graph.statements.expressions.CallExpression>"
        | "xsd:java.util.List<de.fraunhofer.aisec.cpg.graph.declarations.TranslationUnitDeclaration>" => {
            "repeated string"
        }
        "xsd:integer" | "xsd:int" => "int32",
        "xsd:Short" => "uint32",
        "xsd:float" => "float",
        "xsd:java.time.Duration" => "google.protobuf.Duration",
        "xsd:dateTime" | "xsd:java.time.ZonedDateTime" => "google.protobuf.Timestamp",
        // protobuf has no 16-bit integers
        "xsd:java.util.ArrayList<Short>" => "repeated uint32",
        "xsd:java.util.Map<String, String>" => "map<string, string>",
        other => other,
    };

    mapped.to_string()
}
